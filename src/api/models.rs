//! Wire types shared with the server.
//!
//! Timestamps are kept as the server's RFC 3339 strings; the client only
//! ever displays them.

use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Lifecycle of a task on the server.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "closed")]
    Closed,
}

impl TaskStatus {
    /// The status applied by the browser's toggle action: anything done
    /// reopens, anything else resolves.
    ///
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Resolved | TaskStatus::Closed => TaskStatus::Open,
            TaskStatus::Open | TaskStatus::InProgress => TaskStatus::Resolved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Resolved => "resolved",
            TaskStatus::Closed => "closed",
        }
    }
}

/// Task priority. `None` is the absence of a priority and is omitted from
/// requests rather than sent literally.
///
#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A logged block of time against a task, in whole minutes.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: u64,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A comment on a task. This client only ever writes private comments.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A unit of work tracked on the server.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Sum of logged time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.time_entries.iter().map(|entry| entry.duration).sum()
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, TaskStatus::Resolved | TaskStatus::Closed)
    }
}

/// A named tag-based filter stored on the server. Excluded tags are
/// displayed but not yet applied to the task list on the client.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub included_tags: Vec<String>,
    #[serde(default)]
    pub excluded_tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Header counters, optionally scoped to a saved query.
///
#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub open: u32,
    pub in_progress: u32,
    pub recently_added: u32,
    pub recently_resolved: u32,
}

/// Window metadata returned with every task listing.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
    pub pages: u64,
}

/// One page of tasks.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub pagination: Pagination,
}

/// One day of the time-breakdown report. `minutes` lines up with the
/// report's query labels; time not attributable to any saved query lands
/// in `other`.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: String,
    pub minutes: Vec<u32>,
    pub other: u32,
    pub total: u32,
}

/// Daily per-query time breakdown with totals and percentages.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct TimeBreakdownReport {
    pub queries: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub totals: Vec<u32>,
    pub other_total: u32,
    pub percentages: Vec<f64>,
}

/// Body for `POST /api/v1/tasks`. Priority is the raw user string; the
/// server validates it.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Partial update for `PATCH /api/v1/tasks/{id}`.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Patch changing only the status.
    pub fn status(status: TaskStatus) -> TaskPatch {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }
}

/// Body for `POST /api/v1/tasks/{id}/time`.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LogTime {
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body for `POST /api/v1/saved-queries`.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewSavedQuery {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_tags: Vec<String>,
}

/// Filter for `GET /api/v1/tasks`. List parameters are comma-joined.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Vec<TaskStatus>,
    pub priority: Vec<Priority>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u64,
}

impl TaskQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.status.is_empty() {
            let csv: Vec<&str> = self.status.iter().map(|s| s.as_str()).collect();
            params.push(("status".to_string(), csv.join(",")));
        }
        if !self.priority.is_empty() {
            let csv: Vec<&str> = self.priority.iter().map(|p| p.as_str()).collect();
            params.push(("priority".to_string(), csv.join(",")));
        }
        if !self.tags.is_empty() {
            params.push(("tags".to_string(), self.tags.join(",")));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params.push(("limit".to_string(), self.limit.to_string()));
        params.push(("offset".to_string(), self.offset.to_string()));
        params
    }
}

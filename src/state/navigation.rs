//! Focus and saved-query selection types.

use crate::api::SavedQuery;

/// Which pane receives keys while no modal is mounted.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Tasks,
    Sidebar,
}

/// The single source of truth for what the table and header show. Both
/// the task filter and the header summary derive from this; the sidebar's
/// visual selection is recomputed from it after every reload.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QuerySelection {
    Active,
    Resolved,
    Saved(u64),
}

impl QuerySelection {
    /// Map a sidebar index to a selection: 0 is "active", 1 is
    /// "resolved", 2.. are saved queries in load order. Out-of-range
    /// indices fall back to `Active`.
    ///
    pub fn from_index(index: usize, queries: &[SavedQuery]) -> QuerySelection {
        match index {
            0 => QuerySelection::Active,
            1 => QuerySelection::Resolved,
            n => queries
                .get(n - 2)
                .map(|query| QuerySelection::Saved(query.id))
                .unwrap_or(QuerySelection::Active),
        }
    }

    /// The inverse of [`QuerySelection::from_index`]. `None` when the
    /// saved query no longer exists.
    ///
    pub fn index_in(&self, queries: &[SavedQuery]) -> Option<usize> {
        match self {
            QuerySelection::Active => Some(0),
            QuerySelection::Resolved => Some(1),
            QuerySelection::Saved(id) => queries
                .iter()
                .position(|query| query.id == *id)
                .map(|position| position + 2),
        }
    }

    /// Display name, used by the header scope suffix and status messages.
    ///
    pub fn label(&self, queries: &[SavedQuery]) -> String {
        match self {
            QuerySelection::Active => "All Active Tasks".to_string(),
            QuerySelection::Resolved => "Resolved".to_string(),
            QuerySelection::Saved(id) => queries
                .iter()
                .find(|query| query.id == *id)
                .map(|query| query.name.clone())
                .unwrap_or_else(|| format!("query #{}", id)),
        }
    }

    pub fn saved_query_id(&self) -> Option<u64> {
        match self {
            QuerySelection::Saved(id) => Some(*id),
            _ => None,
        }
    }
}

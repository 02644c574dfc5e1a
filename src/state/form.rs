//! Modal form state.
//!
//! Each modal owns plain string buffers; multi-line fields store embedded
//! newlines. While a modal is mounted the global key map is suspended and
//! every key is routed here by the browser.

use crate::api::{Priority, Task};

/// Fields of the edit-task modal, in Tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EditField {
    Name,
    Description,
    Tags,
    Priority,
}

impl EditField {
    pub fn next(self) -> EditField {
        match self {
            EditField::Name => EditField::Description,
            EditField::Description => EditField::Tags,
            EditField::Tags => EditField::Priority,
            EditField::Priority => EditField::Name,
        }
    }
}

/// Fields of the log-time modal, in Tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimeField {
    Duration,
    Description,
    Date,
}

impl TimeField {
    pub fn next(self) -> TimeField {
        match self {
            TimeField::Duration => TimeField::Description,
            TimeField::Description => TimeField::Date,
            TimeField::Date => TimeField::Duration,
        }
    }
}

/// Fields of the new-saved-query modal, in Tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QueryField {
    Name,
    Included,
    Excluded,
}

impl QueryField {
    pub fn next(self) -> QueryField {
        match self {
            QueryField::Name => QueryField::Included,
            QueryField::Included => QueryField::Excluded,
            QueryField::Excluded => QueryField::Name,
        }
    }
}

/// Single-line input for the create-task mini-language.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub input: String,
}

/// Edit form seeded from the selected task.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub task_id: u64,
    pub name: String,
    pub description: String,
    pub tags: String,
    pub priority: Priority,
    pub field: EditField,
}

impl EditForm {
    pub fn from_task(task: &Task) -> EditForm {
        EditForm {
            task_id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            tags: task.tags.join(", "),
            priority: task.priority,
            field: EditField::Name,
        }
    }

    /// Comma-separated tags: split, trim, drop empties.
    pub fn parsed_tags(&self) -> Vec<String> {
        split_csv(&self.tags)
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        let all = Priority::ALL;
        let current = all
            .iter()
            .position(|priority| *priority == self.priority)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % all.len()
        } else {
            (current + all.len() - 1) % all.len()
        };
        self.priority = all[next];
    }
}

/// Multi-line comment input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentForm {
    pub task_id: u64,
    pub content: String,
}

/// Log-time form.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeForm {
    pub task_id: u64,
    pub duration: String,
    pub description: String,
    pub date: String,
    pub field: TimeField,
}

impl TimeForm {
    pub fn for_task(task_id: u64) -> TimeForm {
        TimeForm {
            task_id,
            duration: String::new(),
            description: String::new(),
            date: String::new(),
            field: TimeField::Duration,
        }
    }
}

/// Search input, seeded with the current query.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub input: String,
}

/// New-saved-query form.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryForm {
    pub name: String,
    pub included: String,
    pub excluded: String,
    pub field: QueryField,
}

impl QueryForm {
    pub fn new() -> QueryForm {
        QueryForm {
            name: String::new(),
            included: String::new(),
            excluded: String::new(),
            field: QueryField::Name,
        }
    }
}

/// The mounted modal, if any. While this is `Some`, global bindings are
/// structurally unreachable.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Create(CreateForm),
    Edit(EditForm),
    Comment(CommentForm),
    Time(TimeForm),
    Search(SearchForm),
    NewQuery(QueryForm),
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Create(_) => "New Task",
            Modal::Edit(_) => "Edit Task",
            Modal::Comment(_) => "Add Comment",
            Modal::Time(_) => "Log Time",
            Modal::Search(_) => "Search Tasks",
            Modal::NewQuery(_) => "New Saved Query",
        }
    }

    /// Key hints shown in the status bar while the modal is mounted.
    pub fn help(&self) -> &'static str {
        match self {
            Modal::Create(_) => "Enter: create  Esc: cancel",
            Modal::Edit(_) => "Tab: next field  \u{2190}/\u{2192}: priority  Ctrl-S: save  Esc: cancel",
            Modal::Comment(_) => "Enter: newline  Ctrl-S: save  Esc: cancel",
            Modal::Time(_) => "Tab: next field  Enter: save  Esc: cancel",
            Modal::Search(_) => "Enter: search  Esc: cancel",
            Modal::NewQuery(_) => "Tab: next field  Enter: save  Esc: cancel",
        }
    }
}

/// Split a comma-separated list, trimming and dropping empties.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

//! Browser state.
//!
//! One struct owns everything the interactive browser displays: the
//! cached page of tasks, the saved-query list, the header counters, the
//! focus/modal machine, and the status line. All of it is ephemeral; the
//! server is the source of truth.

mod form;
mod navigation;

pub use form::*;
pub use navigation::{Focus, QuerySelection};

use crate::api::{Pagination, SavedQuery, Task, TaskPage, TaskQuery, TaskStatus, TaskSummary};
use ratatui::layout::Rect;
use ratatui::widgets::{ListState, TableState};

/// Tasks fetched per page.
pub const PAGE_SIZE: u32 = 20;

/// Terminals narrower than this start with the sidebar hidden.
const SIDEBAR_WIDTH_THRESHOLD: u16 = 120;

/// Houses data representative of the browser session.
///
pub struct State {
    pub focus: Focus,
    pub modal: Option<Modal>,
    pub selected_query: QuerySelection,
    pub page_index: u64,
    pub page_size: u32,
    pub search: String,
    pub search_active: bool,
    pub sidebar_visible: bool,
    pub tasks: Vec<Task>,
    pub pagination: Option<Pagination>,
    pub saved_queries: Vec<SavedQuery>,
    pub summary: Option<TaskSummary>,
    pub details: Option<Task>,
    pub details_scroll: u16,
    pub table_state: TableState,
    pub sidebar_state: ListState,
    pub status_line: String,
    status_generation: u64,
    status_is_help: bool,
    terminal_size: Rect,
    size_observed: bool,
}

impl Default for State {
    fn default() -> State {
        let mut sidebar_state = ListState::default();
        sidebar_state.select(Some(0));
        State {
            focus: Focus::Tasks,
            modal: None,
            selected_query: QuerySelection::Active,
            page_index: 0,
            page_size: PAGE_SIZE,
            search: String::new(),
            search_active: false,
            sidebar_visible: true,
            tasks: vec![],
            pagination: None,
            saved_queries: vec![],
            summary: None,
            details: None,
            details_scroll: 0,
            table_state: TableState::default(),
            sidebar_state,
            status_line: help_line(Focus::Tasks).to_string(),
            status_generation: 0,
            status_is_help: true,
            terminal_size: Rect::default(),
            size_observed: false,
        }
    }
}

impl State {
    pub fn new() -> State {
        State::default()
    }

    /// Record the terminal size. The first observation decides the
    /// sidebar's default visibility; afterwards the user's toggle is
    /// authoritative.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) {
        if !self.size_observed {
            self.sidebar_visible = size.width >= SIDEBAR_WIDTH_THRESHOLD;
            self.size_observed = true;
        }
        self.terminal_size = size;
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// The task backing the highlighted table row.
    ///
    pub fn selected_task(&self) -> Option<&Task> {
        self.table_state
            .selected()
            .and_then(|index| self.tasks.get(index))
    }

    /// Replace the cached page. The first data row is selected when the
    /// page is non-empty; an empty page clears the selection entirely.
    ///
    pub fn set_tasks(&mut self, page: TaskPage) {
        self.tasks = page.items;
        self.pagination = Some(page.pagination);
        self.table_state = TableState::default();
        if !self.tasks.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn select_next_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(index) => (index + 1).min(self.tasks.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let previous = self.table_state.selected().unwrap_or(0).saturating_sub(1);
        self.table_state.select(Some(previous));
    }

    pub fn select_next_sidebar_entry(&mut self) {
        let last = self.sidebar_len().saturating_sub(1);
        let next = match self.sidebar_state.selected() {
            Some(index) => (index + 1).min(last),
            None => 0,
        };
        self.sidebar_state.select(Some(next));
    }

    pub fn select_previous_sidebar_entry(&mut self) {
        let previous = self.sidebar_state.selected().unwrap_or(0).saturating_sub(1);
        self.sidebar_state.select(Some(previous));
    }

    /// Fixed entries plus saved queries.
    pub fn sidebar_len(&self) -> usize {
        2 + self.saved_queries.len()
    }

    /// Re-point the sidebar highlight at `selected_query` after the list
    /// changes. A selection whose saved query vanished falls back to the
    /// active view.
    ///
    pub fn restore_sidebar_selection(&mut self) {
        let index = match self.selected_query.index_in(&self.saved_queries) {
            Some(index) => index,
            None => {
                self.selected_query = QuerySelection::Active;
                0
            }
        };
        self.sidebar_state.select(Some(index));
    }

    /// Derive the task-list filter from the current selection, search,
    /// and page window.
    ///
    pub fn filter(&self) -> TaskQuery {
        let mut query = TaskQuery {
            limit: self.page_size,
            offset: self.page_index * self.page_size as u64,
            ..TaskQuery::default()
        };
        match self.selected_query {
            QuerySelection::Active => {
                query.status = vec![TaskStatus::Open, TaskStatus::InProgress];
            }
            QuerySelection::Resolved => {
                query.status = vec![TaskStatus::Resolved];
            }
            QuerySelection::Saved(id) => {
                // Saved queries view active tasks only. Excluded tags are
                // not yet applied client-side.
                query.status = vec![TaskStatus::Open, TaskStatus::InProgress];
                if let Some(saved) = self.saved_queries.iter().find(|q| q.id == id) {
                    query.tags = saved.included_tags.clone();
                }
            }
        }
        if self.search_active {
            query.search = Some(self.search.clone());
        }
        query
    }

    /// Write a transient status message; returns the generation the
    /// reversion timer must present to clear it.
    ///
    pub fn set_status(&mut self, message: impl Into<String>) -> u64 {
        self.status_line = message.into();
        self.status_is_help = false;
        self.status_generation += 1;
        self.status_generation
    }

    /// Timer callback: restore the focus-appropriate help line unless a
    /// newer message superseded this generation.
    ///
    pub fn expire_status(&mut self, generation: u64) {
        if generation == self.status_generation {
            self.show_help();
        }
    }

    /// Put the help line for the current focus (or modal) in the status
    /// bar.
    ///
    pub fn show_help(&mut self) {
        self.status_line = self.current_help().to_string();
        self.status_is_help = true;
    }

    /// Re-render help on focus changes, but never clobber a transient
    /// message before its timer fires.
    ///
    pub fn refresh_help(&mut self) {
        if self.status_is_help {
            self.show_help();
        }
    }

    fn current_help(&self) -> &'static str {
        if let Some(modal) = &self.modal {
            return modal.help();
        }
        if self.details.is_some() {
            return "j/k: scroll  Esc: back";
        }
        help_line(self.focus)
    }
}

fn help_line(focus: Focus) -> &'static str {
    match focus {
        Focus::Tasks => {
            "q: quit  A: new  e: edit  r: toggle  c: comment  t: time  /: search  x: clear  n/p: page  Enter: details  Tab: sidebar  Q: panel"
        }
        Focus::Sidebar => {
            "q: quit  Enter: select  n: new query  a/r/1-9: jump  Tab: tasks  Q: panel"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Pagination;
    use fake::{Fake, Faker};

    fn page(count: usize) -> TaskPage {
        let items = (0..count)
            .map(|index| {
                let mut task: Task = Faker.fake();
                task.id = index as u64 + 1;
                task
            })
            .collect();
        TaskPage {
            items,
            pagination: Pagination {
                total: count as u64,
                limit: PAGE_SIZE,
                offset: 0,
                pages: 1,
            },
        }
    }

    #[test]
    fn repopulation_selects_the_first_row() {
        let mut state = State::new();
        state.set_tasks(page(3));
        assert_eq!(state.table_state.selected(), Some(0));
        assert_eq!(state.selected_task().map(|task| task.id), Some(1));
    }

    #[test]
    fn empty_page_clears_the_selection() {
        let mut state = State::new();
        state.set_tasks(page(3));
        state.set_tasks(page(0));
        assert_eq!(state.table_state.selected(), None);
        assert!(state.selected_task().is_none());
    }

    #[test]
    fn row_selection_is_clamped() {
        let mut state = State::new();
        state.set_tasks(page(2));
        state.select_next_task();
        state.select_next_task();
        state.select_next_task();
        assert_eq!(state.table_state.selected(), Some(1));
        state.select_previous_task();
        state.select_previous_task();
        assert_eq!(state.table_state.selected(), Some(0));
    }

    #[test]
    fn first_size_observation_decides_sidebar_visibility() {
        let mut state = State::new();
        state.set_terminal_size(Rect::new(0, 0, 100, 40));
        assert!(!state.sidebar_visible);

        // Later growth does not override the user's view.
        state.set_terminal_size(Rect::new(0, 0, 200, 40));
        assert!(!state.sidebar_visible);
    }

    #[test]
    fn wide_terminal_shows_sidebar() {
        let mut state = State::new();
        state.set_terminal_size(Rect::new(0, 0, 160, 40));
        assert!(state.sidebar_visible);
    }

    #[test]
    fn active_filter() {
        let state = State::new();
        let query = state.filter();
        assert_eq!(
            query.status,
            vec![TaskStatus::Open, TaskStatus::InProgress]
        );
        assert_eq!(query.limit, PAGE_SIZE);
        assert_eq!(query.offset, 0);
        assert_eq!(query.search, None);
    }

    #[test]
    fn resolved_filter() {
        let mut state = State::new();
        state.selected_query = QuerySelection::Resolved;
        assert_eq!(state.filter().status, vec![TaskStatus::Resolved]);
    }

    #[test]
    fn saved_query_filter_forces_active_statuses() {
        let mut state = State::new();
        let mut saved: SavedQuery = Faker.fake();
        saved.id = 7;
        saved.included_tags = vec!["backend".to_string()];
        state.saved_queries = vec![saved];
        state.selected_query = QuerySelection::Saved(7);

        let query = state.filter();
        assert_eq!(query.tags, vec!["backend"]);
        assert_eq!(
            query.status,
            vec![TaskStatus::Open, TaskStatus::InProgress]
        );
    }

    #[test]
    fn unknown_saved_query_falls_back_to_active() {
        let mut state = State::new();
        state.selected_query = QuerySelection::Saved(99);
        state.restore_sidebar_selection();
        assert_eq!(state.selected_query, QuerySelection::Active);
        assert_eq!(state.sidebar_state.selected(), Some(0));
    }

    #[test]
    fn search_term_is_included_only_while_active() {
        let mut state = State::new();
        state.search = "auth".to_string();
        assert_eq!(state.filter().search, None);
        state.search_active = true;
        assert_eq!(state.filter().search.as_deref(), Some("auth"));
    }

    #[test]
    fn offset_follows_the_page_index() {
        let mut state = State::new();
        state.page_index = 2;
        assert_eq!(state.filter().offset, 40);
    }

    #[test]
    fn stale_status_generation_is_ignored() {
        let mut state = State::new();
        let first = state.set_status("one");
        let second = state.set_status("two");
        state.expire_status(first);
        assert_eq!(state.status_line, "two");
        state.expire_status(second);
        assert_ne!(state.status_line, "two");
    }

    #[test]
    fn help_follows_focus_on_expiry() {
        let mut state = State::new();
        let generation = state.set_status("saved");
        state.focus = Focus::Sidebar;
        state.expire_status(generation);
        assert!(state.status_line.contains("new query"));
    }

    #[test]
    fn refresh_help_never_clobbers_a_transient_message() {
        let mut state = State::new();
        state.set_status("important");
        state.focus = Focus::Sidebar;
        state.refresh_help();
        assert_eq!(state.status_line, "important");
    }
}

//! Key handling and server round-trips for the interactive browser.
//!
//! The browser mutates [`State`] only from `handle_key` and
//! `on_status_expired`, both called from the main loop, so no state is
//! ever touched from another thread. API calls are awaited inline; the
//! screen simply does not advance while one is in flight.

use crate::api::{ApiError, Jats, TaskPatch, TaskQuery};
use crate::events::Event;
use crate::state::{
    CommentForm, CreateForm, EditForm, Modal, QueryForm, SearchForm, State, TimeForm,
};
use crate::state::{Focus, QuerySelection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// How long a transient status message stays before the help line
/// returns.
const STATUS_REVERSION: Duration = Duration::from_secs(3);

pub struct Browser {
    state: State,
    api: Jats,
    events: mpsc::Sender<Event>,
}

impl Browser {
    pub fn new(api: Jats, events: mpsc::Sender<Event>) -> Browser {
        Browser {
            state: State::new(),
            api,
            events,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub(super) fn api(&self) -> &Jats {
        &self.api
    }

    /// Initial load: saved queries, header counters, first page of tasks.
    pub async fn init(&mut self) -> Result<(), ApiError> {
        self.refresh_all().await
    }

    /// Route one key press. Returns `false` when the application should
    /// exit.
    ///
    pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return true;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return false;
        }

        // A mounted modal owns the keyboard outright.
        if self.state.modal.is_some() {
            self.handle_modal_key(key).await;
            return true;
        }
        if self.state.details.is_some() {
            self.handle_details_key(key);
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('Q') => self.toggle_sidebar(),
            KeyCode::Char('A') => {
                self.state.modal = Some(Modal::Create(CreateForm::default()));
                self.state.show_help();
            }
            KeyCode::F(5) => {
                if let Err(err) = self.refresh_all().await {
                    self.note_api_error(&err);
                } else {
                    self.set_status("Refreshed");
                }
            }
            KeyCode::Tab => self.switch_focus(),
            _ => match self.state.focus {
                Focus::Tasks => self.handle_tasks_key(key).await,
                Focus::Sidebar => self.handle_sidebar_key(key).await,
            },
        }
        true
    }

    async fn handle_tasks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_task(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_previous_task(),
            KeyCode::Char('n') => self.next_page().await,
            KeyCode::Char('p') => self.previous_page().await,
            KeyCode::Char('r') => self.toggle_selected_status().await,
            KeyCode::Char('e') => {
                if let Some(task) = self.state.selected_task() {
                    self.state.modal = Some(Modal::Edit(EditForm::from_task(task)));
                    self.state.show_help();
                }
            }
            KeyCode::Char('c') => {
                if let Some(task) = self.state.selected_task() {
                    self.state.modal = Some(Modal::Comment(CommentForm {
                        task_id: task.id,
                        content: String::new(),
                    }));
                    self.state.show_help();
                }
            }
            KeyCode::Char('t') => {
                if let Some(task) = self.state.selected_task() {
                    self.state.modal = Some(Modal::Time(TimeForm::for_task(task.id)));
                    self.state.show_help();
                }
            }
            KeyCode::Char('/') => {
                self.state.modal = Some(Modal::Search(SearchForm {
                    input: self.state.search.clone(),
                }));
                self.state.show_help();
            }
            KeyCode::Char('x') => self.clear_search().await,
            KeyCode::Enter => self.open_details().await,
            _ => {}
        }
    }

    async fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_sidebar_entry(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_previous_sidebar_entry(),
            KeyCode::Char('n') => {
                self.state.modal = Some(Modal::NewQuery(QueryForm::new()));
                self.state.show_help();
            }
            KeyCode::Enter => {
                if let Some(index) = self.state.sidebar_state.selected() {
                    self.select_sidebar_entry(index).await;
                }
            }
            KeyCode::Char('a') => self.select_sidebar_entry(0).await,
            KeyCode::Char('r') => self.select_sidebar_entry(1).await,
            KeyCode::Char(digit @ '1'..='9') => {
                let slot = digit as usize - '1' as usize;
                if slot < self.state.saved_queries.len() {
                    self.select_sidebar_entry(slot + 2).await;
                }
            }
            _ => {}
        }
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state.details = None;
                self.state.details_scroll = 0;
                self.state.show_help();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.details_scroll = self.state.details_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.details_scroll = self.state.details_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn switch_focus(&mut self) {
        if !self.state.sidebar_visible {
            return;
        }
        self.state.focus = match self.state.focus {
            Focus::Tasks => Focus::Sidebar,
            Focus::Sidebar => Focus::Tasks,
        };
        self.state.refresh_help();
    }

    fn toggle_sidebar(&mut self) {
        self.state.sidebar_visible = !self.state.sidebar_visible;
        // Hiding the pane that holds focus strands the keyboard.
        if !self.state.sidebar_visible && self.state.focus == Focus::Sidebar {
            self.state.focus = Focus::Tasks;
        }
        self.state.refresh_help();
    }

    /// Write a transient status message and arm its reversion timer. The
    /// timer feeds back through the event queue; a stale generation is
    /// ignored on arrival.
    ///
    pub fn set_status(&mut self, message: impl Into<String>) {
        let generation = self.state.set_status(message);
        let sender = self.events.clone();
        thread::spawn(move || {
            thread::sleep(STATUS_REVERSION);
            let _ = sender.send(Event::StatusExpired(generation));
        });
    }

    pub fn on_status_expired(&mut self, generation: u64) {
        self.state.expire_status(generation);
    }

    pub(super) fn note_api_error(&mut self, err: &ApiError) {
        warn!("api error: {}", err);
        self.set_status(format!("Error: {}", err));
    }

    pub fn note_error(&mut self, err: &impl std::fmt::Display) {
        self.set_status(format!("Error: {}", err));
    }

    fn current_filter(&self) -> TaskQuery {
        self.state.filter()
    }

    /// Fetch the current page; state is mutated only on success.
    async fn fetch_tasks(&mut self) -> Result<(), ApiError> {
        let page = self.api.tasks(&self.current_filter()).await?;
        self.state.set_tasks(page);
        Ok(())
    }

    pub(super) async fn refresh_tasks(&mut self) {
        if let Err(err) = self.fetch_tasks().await {
            self.note_api_error(&err);
        }
    }

    /// Reload the header counters for the current scope.
    pub(super) async fn update_header(&mut self) {
        match self
            .api
            .task_summary(self.state.selected_query.saved_query_id())
            .await
        {
            Ok(summary) => self.state.summary = Some(summary),
            Err(err) => self.note_api_error(&err),
        }
    }

    pub(super) async fn load_saved_queries(&mut self) -> Result<(), ApiError> {
        self.state.saved_queries = self.api.saved_queries().await?;
        self.state.restore_sidebar_selection();
        Ok(())
    }

    /// Full reload: saved queries, header, tasks.
    pub(super) async fn refresh_all(&mut self) -> Result<(), ApiError> {
        self.load_saved_queries().await?;
        let summary = self
            .api
            .task_summary(self.state.selected_query.saved_query_id())
            .await?;
        self.state.summary = Some(summary);
        self.fetch_tasks().await
    }

    /// Commit a sidebar selection: reset the page window, refetch tasks
    /// and the scoped header. The saved-query list itself is left alone.
    ///
    async fn select_sidebar_entry(&mut self, index: usize) {
        self.state.selected_query =
            QuerySelection::from_index(index, &self.state.saved_queries);
        self.state.restore_sidebar_selection();
        self.state.page_index = 0;
        self.update_header().await;
        self.refresh_tasks().await;
        let label = self.state.selected_query.label(&self.state.saved_queries);
        self.set_status(format!("Selected query: {}", label));
    }

    async fn next_page(&mut self) {
        self.state.page_index += 1;
        if let Err(err) = self.fetch_tasks().await {
            self.state.page_index -= 1;
            self.note_api_error(&err);
        }
    }

    async fn previous_page(&mut self) {
        if self.state.page_index == 0 {
            self.set_status("Already on first page");
            return;
        }
        self.state.page_index -= 1;
        if let Err(err) = self.fetch_tasks().await {
            self.state.page_index += 1;
            self.note_api_error(&err);
        }
    }

    /// Flip the selected task between done and not-done, then reload
    /// everything the change can affect.
    ///
    async fn toggle_selected_status(&mut self) {
        let Some(task) = self.state.selected_task() else {
            return;
        };
        let id = task.id;
        let next = task.status.toggled();
        match self.api.update_task(id, &TaskPatch::status(next)).await {
            Ok(_) => {
                if let Err(err) = self.refresh_all().await {
                    self.note_api_error(&err);
                } else {
                    self.set_status(format!("Task marked {}", next.as_str()));
                }
            }
            Err(err) => self.note_api_error(&err),
        }
    }

    async fn clear_search(&mut self) {
        if !self.state.search_active {
            return;
        }
        self.state.search.clear();
        self.state.search_active = false;
        self.state.page_index = 0;
        self.refresh_tasks().await;
        self.set_status("Search cleared");
    }

    async fn open_details(&mut self) {
        let Some(task) = self.state.selected_task() else {
            return;
        };
        match self.api.task(task.id).await {
            Ok(task) => {
                self.state.details = Some(task);
                self.state.details_scroll = 0;
                self.state.show_help();
            }
            Err(err) => self.note_api_error(&err),
        }
    }
}

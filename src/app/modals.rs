//! Modal key routing and form submission.
//!
//! While a modal is mounted it receives every key; the global bindings in
//! `browser` are never consulted. Submissions that fail validation leave
//! the modal mounted with the problem in the status bar.

use super::Browser;
use crate::api::{CreateTask, LogTime, NewSavedQuery, Priority, TaskPatch, TaskStatus};
use crate::state::{split_csv, EditField, Modal, QueryField, TimeField};
use crate::utils::duration::{format_minutes, parse_duration};
use crate::utils::task_input::parse_task_input;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl Browser {
    pub(super) async fn handle_modal_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.close_modal();
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Submission keys first; everything else edits the form in place.
        let submits = match (&self.state().modal, key.code) {
            (Some(Modal::Create(_)), KeyCode::Enter) => true,
            (Some(Modal::Edit(_)), KeyCode::Char('s')) => ctrl,
            (Some(Modal::Comment(_)), KeyCode::Char('s')) => ctrl,
            (Some(Modal::Time(_)), KeyCode::Enter) => true,
            (Some(Modal::Search(_)), KeyCode::Enter) => true,
            (Some(Modal::NewQuery(_)), KeyCode::Enter) => true,
            _ => false,
        };
        if submits {
            self.submit_modal().await;
            return;
        }

        let Some(modal) = &mut self.state_mut().modal else {
            return;
        };
        match modal {
            Modal::Create(form) => match key.code {
                KeyCode::Backspace => {
                    form.input.pop();
                }
                KeyCode::Char(c) => form.input.push(c),
                _ => {}
            },
            Modal::Edit(form) => match key.code {
                KeyCode::Tab => form.field = form.field.next(),
                KeyCode::Left if form.field == EditField::Priority => {
                    form.cycle_priority(false)
                }
                KeyCode::Right if form.field == EditField::Priority => {
                    form.cycle_priority(true)
                }
                KeyCode::Enter if form.field == EditField::Description => {
                    form.description.push('\n')
                }
                KeyCode::Backspace => {
                    match form.field {
                        EditField::Name => form.name.pop(),
                        EditField::Description => form.description.pop(),
                        EditField::Tags => form.tags.pop(),
                        EditField::Priority => None,
                    };
                }
                KeyCode::Char(c) => match form.field {
                    EditField::Name => form.name.push(c),
                    EditField::Description => form.description.push(c),
                    EditField::Tags => form.tags.push(c),
                    EditField::Priority => {}
                },
                _ => {}
            },
            Modal::Comment(form) => match key.code {
                KeyCode::Enter => form.content.push('\n'),
                KeyCode::Backspace => {
                    form.content.pop();
                }
                KeyCode::Char(c) => form.content.push(c),
                _ => {}
            },
            Modal::Time(form) => match key.code {
                KeyCode::Tab => form.field = form.field.next(),
                KeyCode::Backspace => {
                    match form.field {
                        TimeField::Duration => form.duration.pop(),
                        TimeField::Description => form.description.pop(),
                        TimeField::Date => form.date.pop(),
                    };
                }
                KeyCode::Char(c) => match form.field {
                    TimeField::Duration => form.duration.push(c),
                    TimeField::Description => form.description.push(c),
                    TimeField::Date => form.date.push(c),
                },
                _ => {}
            },
            Modal::Search(form) => match key.code {
                KeyCode::Backspace => {
                    form.input.pop();
                }
                KeyCode::Char(c) => form.input.push(c),
                _ => {}
            },
            Modal::NewQuery(form) => match key.code {
                KeyCode::Tab => form.field = form.field.next(),
                KeyCode::Backspace => {
                    match form.field {
                        QueryField::Name => form.name.pop(),
                        QueryField::Included => form.included.pop(),
                        QueryField::Excluded => form.excluded.pop(),
                    };
                }
                KeyCode::Char(c) => match form.field {
                    QueryField::Name => form.name.push(c),
                    QueryField::Included => form.included.push(c),
                    QueryField::Excluded => form.excluded.push(c),
                },
                _ => {}
            },
        }
    }

    async fn submit_modal(&mut self) {
        enum Kind {
            Create,
            Edit,
            Comment,
            Time,
            Search,
            NewQuery,
        }
        let kind = match &self.state().modal {
            Some(Modal::Create(_)) => Kind::Create,
            Some(Modal::Edit(_)) => Kind::Edit,
            Some(Modal::Comment(_)) => Kind::Comment,
            Some(Modal::Time(_)) => Kind::Time,
            Some(Modal::Search(_)) => Kind::Search,
            Some(Modal::NewQuery(_)) => Kind::NewQuery,
            None => return,
        };
        match kind {
            Kind::Create => self.submit_create().await,
            Kind::Edit => self.submit_edit().await,
            Kind::Comment => self.submit_comment().await,
            Kind::Time => self.submit_time().await,
            Kind::Search => self.commit_search().await,
            Kind::NewQuery => self.submit_new_query().await,
        }
    }

    fn close_modal(&mut self) {
        self.state_mut().modal = None;
        self.state_mut().show_help();
    }

    /// Create-task submission: parse the mini-language, validate before
    /// any request is made, then chain create / log time / resolve.
    ///
    async fn submit_create(&mut self) {
        let Some(Modal::Create(form)) = &self.state().modal else {
            return;
        };
        let parsed = parse_task_input(&form.input);
        if parsed.name.is_empty() {
            self.set_status("Task name cannot be empty");
            return;
        }
        let minutes = match &parsed.flags.time {
            Some(raw) => match parse_duration(raw) {
                Ok(minutes) => Some(minutes),
                Err(err) => {
                    self.set_status(err.to_string());
                    return;
                }
            },
            None => None,
        };

        let request = CreateTask {
            name: parsed.name.clone(),
            priority: parsed.flags.priority.clone(),
            tags: parsed.tags.clone(),
            date: parsed.flags.date.clone(),
        };
        let task = match self.api().create_task(&request).await {
            Ok(task) => task,
            Err(err) => {
                self.note_api_error(&err);
                return;
            }
        };

        let mut message = format!("Created task '{}'", task.name);
        if let Some(minutes) = minutes {
            let entry = LogTime {
                duration: minutes,
                description: None,
                date: parsed.flags.date.clone(),
            };
            match self.api().log_time(task.id, &entry).await {
                Ok(_) => message.push_str(&format!(", logged {}", format_minutes(minutes))),
                Err(err) => {
                    self.note_api_error(&err);
                    return;
                }
            }
        }
        if parsed.flags.complete {
            match self
                .api()
                .update_task(task.id, &TaskPatch::status(TaskStatus::Resolved))
                .await
            {
                Ok(_) => message.push_str(", resolved"),
                Err(err) => {
                    self.note_api_error(&err);
                    return;
                }
            }
        }

        self.close_modal();
        if let Err(err) = self.refresh_all().await {
            self.note_api_error(&err);
            return;
        }
        self.set_status(message);
    }

    async fn submit_edit(&mut self) {
        let Some(Modal::Edit(form)) = &self.state().modal else {
            return;
        };
        if form.name.trim().is_empty() {
            self.set_status("Task name cannot be empty");
            return;
        }
        let patch = TaskPatch {
            name: Some(form.name.trim().to_string()),
            description: Some(form.description.clone()),
            tags: Some(form.parsed_tags()),
            priority: match form.priority {
                Priority::None => None,
                other => Some(other),
            },
            status: None,
        };
        let task_id = form.task_id;
        match self.api().update_task(task_id, &patch).await {
            Ok(task) => {
                self.close_modal();
                if let Err(err) = self.refresh_all().await {
                    self.note_api_error(&err);
                    return;
                }
                self.set_status(format!("Updated task '{}'", task.name));
            }
            Err(err) => self.note_api_error(&err),
        }
    }

    async fn submit_comment(&mut self) {
        let Some(Modal::Comment(form)) = &self.state().modal else {
            return;
        };
        let content = form.content.trim().to_string();
        if content.is_empty() {
            self.set_status("Comment cannot be empty");
            return;
        }
        let task_id = form.task_id;
        match self.api().add_comment(task_id, &content).await {
            Ok(_) => {
                self.close_modal();
                if let Err(err) = self.refresh_all().await {
                    self.note_api_error(&err);
                    return;
                }
                self.set_status("Comment added");
            }
            Err(err) => self.note_api_error(&err),
        }
    }

    async fn submit_time(&mut self) {
        let Some(Modal::Time(form)) = &self.state().modal else {
            return;
        };
        let minutes = match parse_duration(form.duration.trim()) {
            Ok(minutes) => minutes,
            Err(err) => {
                self.set_status(err.to_string());
                return;
            }
        };
        let description = form.description.trim();
        let entry = LogTime {
            duration: minutes,
            description: Some(if description.is_empty() {
                "Time logged via TUI".to_string()
            } else {
                description.to_string()
            }),
            date: match form.date.trim() {
                "" => None,
                date => Some(date.to_string()),
            },
        };
        let task_id = form.task_id;
        match self.api().log_time(task_id, &entry).await {
            Ok(_) => {
                self.close_modal();
                if let Err(err) = self.refresh_all().await {
                    self.note_api_error(&err);
                    return;
                }
                self.set_status(format!("Logged {}", format_minutes(minutes)));
            }
            Err(err) => self.note_api_error(&err),
        }
    }

    /// Commit the search term: an empty input clears the search, anything
    /// else activates it. Either way the page window resets and only the
    /// task list reloads.
    ///
    async fn commit_search(&mut self) {
        let Some(Modal::Search(form)) = &self.state().modal else {
            return;
        };
        let term = form.input.trim().to_string();
        self.state_mut().search = term.clone();
        self.state_mut().search_active = !term.is_empty();
        self.state_mut().page_index = 0;
        self.close_modal();
        self.refresh_tasks().await;
        if term.is_empty() {
            self.set_status("Search cleared");
        } else {
            self.set_status(format!("Searching for '{}'", term));
        }
    }

    /// Create a saved query, then reload the list and jump to the new
    /// entry. The header keeps its previous scope until the user selects
    /// the query explicitly.
    ///
    async fn submit_new_query(&mut self) {
        let Some(Modal::NewQuery(form)) = &self.state().modal else {
            return;
        };
        if form.name.trim().is_empty() {
            self.set_status("Query name cannot be empty");
            return;
        }
        let request = NewSavedQuery {
            name: form.name.trim().to_string(),
            included_tags: split_csv(&form.included),
            excluded_tags: split_csv(&form.excluded),
        };
        let created = match self.api().create_saved_query(&request).await {
            Ok(created) => created,
            Err(err) => {
                self.note_api_error(&err);
                return;
            }
        };

        self.close_modal();
        if let Err(err) = self.load_saved_queries().await {
            self.note_api_error(&err);
            return;
        }
        self.state_mut().selected_query = crate::state::QuerySelection::Saved(created.id);
        self.state_mut().restore_sidebar_selection();
        self.state_mut().page_index = 0;
        self.refresh_tasks().await;
        self.set_status(format!("Saved query '{}'", created.name));
    }
}

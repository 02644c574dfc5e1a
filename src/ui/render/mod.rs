//! Frame layout.
//!
//! Three bands: a summary header, the main area (sidebar plus task table,
//! or the details view), and a one-line status bar. A mounted modal is
//! drawn last, over everything.

mod details;
mod header;
mod modals;
mod sidebar;
mod status_bar;
mod tasks;

use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn render(frame: &mut Frame, state: &mut State) {
    let bands = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    header::render(frame, bands[0], state);
    status_bar::render(frame, bands[2], state);

    if state.details.is_some() {
        details::render(frame, bands[1], state);
    } else if state.sidebar_visible {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4), Constraint::Ratio(3, 4)])
            .split(bands[1]);
        sidebar::render(frame, panes[0], state);
        tasks::render(frame, panes[1], state);
    } else {
        tasks::render(frame, bands[1], state);
    }

    if state.modal.is_some() {
        modals::render(frame, state);
    }
}

//! Shared colors and layout helpers.

use crate::api::{Priority, TaskStatus};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::None => Color::DarkGray,
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Open => Color::White,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Resolved => Color::Green,
        TaskStatus::Closed => Color::DarkGray,
    }
}

/// A rectangle centered in `area`, sized as percentages of it.
///
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

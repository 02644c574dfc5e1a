//! The task table.

use crate::state::{Focus, State};
use crate::ui::style::{priority_color, status_color};
use crate::utils::duration::format_minutes;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, state: &mut State) {
    let rows: Vec<Row> = state
        .tasks
        .iter()
        .map(|task| {
            let check = if task.is_done() { "\u{2713}" } else { " " };
            let tags = if task.tags.is_empty() {
                "-".to_string()
            } else {
                task.tags.join(",")
            };
            let time = if task.time_entries.is_empty() {
                "-".to_string()
            } else {
                format_minutes(task.total_minutes())
            };
            Row::new(vec![
                Cell::from(check),
                Cell::from(task.name.clone()),
                Cell::from(tags),
                Cell::from(time),
                Cell::from(Span::styled(
                    task.priority.as_str(),
                    Style::default().fg(priority_color(task.priority)),
                )),
                Cell::from(Span::styled(
                    task.status.as_str(),
                    Style::default().fg(status_color(task.status)),
                )),
            ])
        })
        .collect();

    let title = match &state.pagination {
        Some(pagination) => format!(
            " Tasks (page {}/{}, {} total) ",
            state.page_index + 1,
            pagination.pages.max(1),
            pagination.total
        ),
        None => " Tasks ".to_string(),
    };
    let border_style = if state.focus == Focus::Tasks {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["", "Name", "Tags", "Time", "Pri", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    if !state.tasks.is_empty() {
        table = table
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
    }
    frame.render_stateful_widget(table, area, &mut state.table_state);
}

//! Full-task view: description, metadata, time entries, comments.

use crate::state::State;
use crate::ui::style::{priority_color, status_color};
use crate::utils::duration::format_minutes;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, state: &State) {
    let Some(task) = &state.details else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                task.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                task.status.as_str(),
                Style::default().fg(status_color(task.status)),
            ),
            Span::raw("  "),
            Span::styled(
                task.priority.as_str(),
                Style::default().fg(priority_color(task.priority)),
            ),
        ]),
        Line::from(""),
    ];
    if !task.tags.is_empty() {
        lines.push(Line::from(format!("Tags: {}", task.tags.join(", "))));
    }
    if let Some(created) = &task.created_at {
        lines.push(Line::from(format!("Created: {}", format_stamp(created))));
    }
    lines.push(Line::from(""));
    if task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no description)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for row in task.description.lines() {
            lines.push(Line::from(row.to_string()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Time logged: {} ({} entries)",
            format_minutes(task.total_minutes()),
            task.time_entries.len()
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for entry in &task.time_entries {
        let note = entry.description.as_deref().unwrap_or("-");
        lines.push(Line::from(format!(
            "  {}  {}",
            format_minutes(entry.duration),
            note
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Comments ({})", task.comments.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for comment in &task.comments {
        let stamp = comment.created_at.as_deref().map(format_stamp).unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("  {}", stamp),
            Style::default().fg(Color::DarkGray),
        )));
        for row in comment.content.lines() {
            lines.push(Line::from(format!("  {}", row)));
        }
    }

    let view = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Task #{} ", task.id)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.details_scroll, 0));
    frame.render_widget(view, area);
}

/// Server timestamps are RFC 3339; show them in local time, or verbatim
/// when they do not parse.
fn format_stamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|stamp| {
            stamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

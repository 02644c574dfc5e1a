//! Summary header: task counters, scoped to the selected saved query.

use crate::state::{QuerySelection, State};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, state: &State) {
    let mut spans = vec![];
    match &state.summary {
        Some(summary) => {
            spans.push(Span::styled(
                format!("Open: {}", summary.open),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("In Progress: {}", summary.in_progress),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("Added (7d): {}", summary.recently_added),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("Resolved (7d): {}", summary.recently_resolved),
                Style::default().fg(Color::Green),
            ));
        }
        None => spans.push(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )),
    }
    if let QuerySelection::Saved(_) = state.selected_query {
        spans.push(Span::styled(
            format!(
                "  (Filtered: {})",
                state.selected_query.label(&state.saved_queries)
            ),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" jats "));
    frame.render_widget(header, area);
}

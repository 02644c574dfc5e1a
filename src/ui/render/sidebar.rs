//! Saved-query sidebar.
//!
//! Entry order is fixed: the two built-in views, then saved queries in
//! load order. Shortcut labels mirror the jump keys.

use crate::state::{Focus, State};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, state: &mut State) {
    let mut items = vec![
        ListItem::new("[a] All Active Tasks"),
        ListItem::new("[r] Resolved"),
    ];
    for (slot, query) in state.saved_queries.iter().enumerate() {
        let label = if slot < 9 {
            format!("[{}] {}", slot + 1, query.name)
        } else {
            format!("    {}", query.name)
        };
        items.push(ListItem::new(label));
    }

    let border_style = if state.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Queries "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state.sidebar_state);
}

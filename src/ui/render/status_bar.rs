//! One-line status bar: help hints or a transient message.

use crate::state::State;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, state: &State) {
    let bar = Paragraph::new(state.status_line.as_str())
        .style(Style::default().fg(Color::Gray).bg(Color::Black));
    frame.render_widget(bar, area);
}

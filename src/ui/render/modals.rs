//! Modal overlays.
//!
//! Every modal clears a centered rectangle and draws on top of the main
//! layout. The active field of a multi-field form carries a `>` marker.

use crate::state::{EditField, Modal, QueryField, State, TimeField};
use crate::ui::style::centered_rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame, state: &State) {
    let Some(modal) = &state.modal else {
        return;
    };

    let area = match modal {
        Modal::Create(_) | Modal::Search(_) => centered_rect(60, 20, frame.size()),
        Modal::Comment(_) => centered_rect(60, 40, frame.size()),
        Modal::Edit(_) | Modal::Time(_) | Modal::NewQuery(_) => {
            centered_rect(60, 50, frame.size())
        }
    };
    frame.render_widget(Clear, area);

    let lines = match modal {
        Modal::Create(form) => vec![
            Line::from(""),
            input_line(&form.input),
            Line::from(""),
            hint_line("name +tag @tag -t 30m -p high -d 2024-01-01 -c"),
        ],
        Modal::Search(form) => vec![Line::from(""), input_line(&form.input)],
        Modal::Comment(form) => {
            let mut lines = vec![];
            for row in form.content.split('\n') {
                lines.push(Line::from(row.to_string()));
            }
            lines
        }
        Modal::Edit(form) => vec![
            field_line("Name", &form.name, form.field == EditField::Name),
            field_line(
                "Description",
                &form.description.replace('\n', " \u{21b5} "),
                form.field == EditField::Description,
            ),
            field_line("Tags", &form.tags, form.field == EditField::Tags),
            field_line(
                "Priority",
                form.priority.as_str(),
                form.field == EditField::Priority,
            ),
        ],
        Modal::Time(form) => vec![
            field_line("Duration", &form.duration, form.field == TimeField::Duration),
            field_line(
                "Description",
                &form.description,
                form.field == TimeField::Description,
            ),
            field_line("Date", &form.date, form.field == TimeField::Date),
            Line::from(""),
            hint_line("duration: 30m, 1h, 2h30m, 1.5h, or minutes"),
        ],
        Modal::NewQuery(form) => vec![
            field_line("Name", &form.name, form.field == QueryField::Name),
            field_line(
                "Included tags",
                &form.included,
                form.field == QueryField::Included,
            ),
            field_line(
                "Excluded tags",
                &form.excluded,
                form.field == QueryField::Excluded,
            ),
            Line::from(""),
            hint_line("tags are comma-separated"),
        ],
    };

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", modal.title())),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn input_line(value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
        Span::styled("\u{2588}", Style::default().fg(Color::Gray)),
    ])
}

fn field_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let marker = if active { "> " } else { "  " };
    let label_style = if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(format!("{}{:<13}", marker, label), label_style),
        Span::raw(value.to_string()),
    ])
}

fn hint_line(hint: &str) -> Line<'static> {
    Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

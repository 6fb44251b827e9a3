use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::store::format_size;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(3), // Heading
        Constraint::Length(3), // Path input
        Constraint::Length(8), // Last upload
        Constraint::Fill(1),   // Info
    ])
    .split(area);

    let heading = vec![
        Line::from(Span::styled(
            " Upload a document",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Pick a file from this machine by typing its path.",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), layout[0]);

    render_input(app, frame, layout[1]);
    render_last_upload(app, frame, layout[2]);

    let info = Paragraph::new(Line::from(Span::styled(
        format!(
            " Any file type is accepted. Documents are stored locally in '{}'.",
            app.uploads_dir.display()
        ),
        Style::default().fg(theme::TEXT_MUTED),
    )))
    .wrap(Wrap { trim: false });
    frame.render_widget(info, layout[3]);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::EditingPath;

    let line = if editing {
        Line::from(vec![
            Span::styled(app.input_buffer.as_str(), Style::default().fg(theme::TEXT)),
            Span::styled("_", Style::default().fg(theme::TEXT_MUTED)),
        ])
    } else if app.uploading {
        Line::from(Span::styled(
            "Saving...",
            Style::default().fg(theme::YELLOW),
        ))
    } else {
        Line::from(Span::styled(
            "Press i or Enter to choose a file",
            Style::default().fg(theme::TEXT_MUTED),
        ))
    };

    let border = if editing { theme::ACCENT } else { theme::TEXT_MUTED };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" File path ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_last_upload(app: &App, frame: &mut Frame, area: Rect) {
    let Some(record) = &app.last_upload else {
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(
                "'{}' uploaded ({})",
                record.original_name,
                format_size(record.size_bytes)
            ),
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        )),
        field("Type", &record.mime),
        field("Stored as", &record.stored_name),
        field("Uploaded", &record.uploaded_at),
        Line::from(""),
        Line::from(vec![
            Span::styled("s", Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!(" save to {}   ", app.download_dir.display()),
                Style::default().fg(theme::TEXT_DIM),
            ),
            Span::styled("h", Style::default().fg(theme::ACCENT)),
            Span::styled(" open history", Style::default().fg(theme::TEXT_DIM)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::GREEN))
        .title(" Last upload ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(theme::TEXT_DIM)),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode, Overlay, Page};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match (&app.overlay, &app.input_mode, app.page) {
        (Overlay::Confirm(_), _, _) => vec![("y/Enter", "confirm"), ("n/Esc", "cancel")],
        (Overlay::Help, _, _) => vec![("?/Esc", "close")],
        (Overlay::None, InputMode::EditingPath, _) => {
            vec![("Enter", "upload"), ("Esc", "cancel")]
        }
        (Overlay::None, InputMode::Normal, Page::Upload) => upload_hints(app),
        (Overlay::None, InputMode::Normal, Page::History) => vec![
            ("j/k", "nav"),
            ("s", "save"),
            ("d", "delete"),
            ("X", "clear"),
            ("u", "upload"),
            ("^R", "reload"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme::ACCENT)));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

fn upload_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("i/Enter", "choose file")];
    if app.last_upload.is_some() {
        hints.push(("s", "save last"));
    }
    hints.extend([("h", "history"), ("?", "help"), ("q", "quit")]);
    hints
}

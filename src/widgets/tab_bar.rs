use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Page};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            " docdepot ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
    ];

    for (i, page) in Page::ALL.iter().enumerate() {
        let label = format!("[{}] {}", i + 1, page.label());
        let style = if *page == app.page {
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::ACCENT_DIM)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        left_spans.push(Span::styled(format!(" {} ", label), style));
        left_spans.push(Span::raw(" "));
    }

    let mut right_spans: Vec<Span> = Vec::new();
    if app.uploading {
        right_spans.push(Span::styled(
            "◌ Saving... ",
            Style::default().fg(theme::YELLOW),
        ));
    }
    if app.documents.data().is_some() {
        right_spans.push(Span::styled(
            format!("[{} documents]", app.summary.count),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }
    right_spans.push(Span::raw(" "));

    // Fill the gap so the right spans sit flush against the edge
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let gap = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}

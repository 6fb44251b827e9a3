use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::app::ConfirmAction;
use crate::theme;

pub fn render(action: &ConfirmAction, frame: &mut Frame, area: Rect) {
    let (message, detail) = match action {
        ConfirmAction::DeleteRecord { id, name } => (
            format!("Delete '{}'?", name),
            format!("Record {} and its stored file will be removed.", id),
        ),
        ConfirmAction::ClearHistory { count } => (
            "Clear the document history?".to_string(),
            format!("{} record(s) and their stored files will be removed.", count),
        ),
    };

    let modal_area = centered_rect(50, 8, area);
    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", detail),
            Style::default().fg(theme::TEXT_DIM),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y/Enter", Style::default().fg(theme::GREEN)),
            Span::raw(" confirm  "),
            Span::styled("n/Esc", Style::default().fg(theme::RED)),
            Span::raw(" cancel"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::YELLOW))
        .title(" Confirm ");

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal_area);
}

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// One line above the footer: the latest error, or else the latest status.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let line = if let Some((ref msg, _)) = app.last_error {
        Line::from(vec![
            Span::styled(" ERROR ", Style::default().fg(theme::TEXT).bg(theme::RED)),
            Span::styled(format!(" {}", msg), Style::default().fg(theme::RED)),
        ])
    } else if let Some((ref msg, _)) = app.status {
        Line::from(vec![
            Span::styled(" OK ", Style::default().fg(theme::BG_DARK).bg(theme::GREEN)),
            Span::styled(format!(" {}", msg), Style::default().fg(theme::GREEN)),
        ])
    } else {
        return;
    };

    let toast_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(line), toast_area);
}

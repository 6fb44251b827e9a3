use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::app::Page;
use crate::theme;

pub fn render(page: Page, frame: &mut Frame, area: Rect) {
    let mut lines = vec![];

    lines.push(Line::from(""));
    lines.push(section("Pages"));
    lines.push(binding("1 / 2", "Upload / History"));
    lines.push(binding("Tab", "Other page"));

    match page {
        Page::Upload => {
            lines.push(Line::from(""));
            lines.push(section("Upload"));
            lines.push(binding("i / Enter", "Type the path of a file"));
            lines.push(binding("Enter (editing)", "Upload it"));
            lines.push(binding("Esc (editing)", "Cancel"));
            lines.push(binding("s", "Save the last upload"));
            lines.push(binding("h", "Open history"));
        }
        Page::History => {
            lines.push(Line::from(""));
            lines.push(section("History"));
            lines.push(binding("j / k / Up / Down", "Navigate"));
            lines.push(binding("g / G", "Top / bottom"));
            lines.push(binding("s / Enter", "Save to download directory"));
            lines.push(binding("d / Del", "Delete document"));
            lines.push(binding("X", "Clear the whole history"));
            lines.push(binding("u", "Back to upload"));
        }
    }

    lines.push(Line::from(""));
    lines.push(section("General"));
    lines.push(binding("Ctrl+R", "Reload history"));
    lines.push(binding("?", "Toggle this help"));
    lines.push(binding("q / Ctrl+C", "Quit"));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Help (? to close) ");

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<22}", key), Style::default().fg(theme::YELLOW)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}

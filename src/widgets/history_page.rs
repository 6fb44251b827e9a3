use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::domain::StoredDocument;
use crate::store::format_size;
use crate::theme;

const HEADER: [&str; 5] = ["Date", "File", "Size", "Type", "Status"];

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(1), // Heading
        Constraint::Length(4), // Metrics
        Constraint::Fill(1),   // Table
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Uploaded documents",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ))),
        layout[0],
    );

    let documents = match app.documents.data() {
        Some(docs) if !docs.is_empty() => docs,
        Some(_) => {
            render_placeholder(frame, layout[1], " No document has been uploaded yet.");
            return;
        }
        None => {
            let label = if app.documents.is_loading() {
                " Loading history..."
            } else {
                " History not loaded"
            };
            render_placeholder(frame, layout[1], label);
            return;
        }
    };

    render_metrics(app, frame, layout[1]);

    let rows: Vec<Row> = documents.iter().map(document_row).collect();
    let widths = [
        Constraint::Length(20),
        Constraint::Percentage(40),
        Constraint::Length(12),
        Constraint::Percentage(30),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header_row())
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, layout[2], &mut app.history_table_state);
}

fn render_placeholder(frame: &mut Frame, area: Rect, label: &str) {
    let widget = Paragraph::new(label).style(Style::default().fg(theme::TEXT_MUTED));
    frame.render_widget(widget, area);
}

fn render_metrics(app: &App, frame: &mut Frame, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let summary = &app.summary;
    let metrics = [
        ("Documents", summary.count.to_string()),
        (
            "Last upload",
            summary.last_uploaded_at.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Space used", format_size(Some(summary.total_bytes))),
    ];

    for ((label, value), column) in metrics.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_MUTED))
            .title(Span::styled(
                format!(" {} ", label),
                Style::default().fg(theme::TEXT_DIM),
            ));
        let widget = Paragraph::new(Span::styled(
            value,
            Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        frame.render_widget(widget, *column);
    }
}

fn header_row() -> Row<'static> {
    Row::new(HEADER.iter().map(|label| Cell::from(*label)).collect::<Vec<_>>())
        .style(
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        )
        .height(1)
}

fn document_row(doc: &StoredDocument) -> Row<'_> {
    let record = &doc.record;
    let status = if doc.on_disk {
        Cell::from("ok").style(Style::default().fg(theme::GREEN))
    } else {
        Cell::from("missing").style(Style::default().fg(theme::RED))
    };
    Row::new(vec![
        Cell::from(or_dash(&record.uploaded_at)),
        Cell::from(or_dash(&record.original_name)),
        Cell::from(format_size(record.size_bytes)),
        Cell::from(or_dash(&record.mime)),
        status,
    ])
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

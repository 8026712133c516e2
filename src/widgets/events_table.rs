use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{App, TableBody};
use crate::domain::{EventRow, VideoCell};
use crate::theme;

pub const HEADER: [&str; crate::app::COLUMN_COUNT] = ["ID", "Timestamp", "Tag ID", "Video"];

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let widths = [
        Constraint::Length(12),
        Constraint::Length(21),
        Constraint::Fill(1),
        Constraint::Length(12),
    ];

    let rows: Vec<Row> = match app.table_body() {
        TableBody::Rows(rows) => rows.iter().map(event_row).collect(),
        TableBody::Placeholder(message) => {
            // A lone message spans the whole body, not just the first column
            let table = Table::new(Vec::<Row>::new(), widths).header(header_row());
            frame.render_widget(table, area);

            let body = Rect {
                y: area.y.saturating_add(1),
                height: area.height.saturating_sub(1),
                ..area
            };
            let color = if app.events.is_error() {
                theme::RED
            } else {
                theme::TEXT_DIM
            };
            frame.render_widget(
                Paragraph::new(format!("  {}", message)).style(Style::default().fg(color)),
                body,
            );
            return;
        }
    };

    let table = Table::new(rows, widths)
        .header(header_row())
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
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

fn event_row(row: &EventRow) -> Row<'static> {
    let video = match &row.video {
        VideoCell::Link { .. } => Cell::from(row.video.label()).style(
            Style::default()
                .fg(theme::BLUE)
                .add_modifier(Modifier::UNDERLINED),
        ),
        VideoCell::NoVideo => {
            Cell::from(row.video.label()).style(Style::default().fg(theme::TEXT_MUTED))
        }
    };

    Row::new(vec![
        Cell::from(row.id.clone()),
        Cell::from(row.timestamp.clone()).style(Style::default().fg(theme::TEXT_DIM)),
        Cell::from(row.tag_id.clone()),
        video,
    ])
    .style(Style::default().fg(theme::TEXT))
}

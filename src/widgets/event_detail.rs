use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(event) = app.selected_event() else {
        return;
    };

    let mut lines = vec![Line::from("")];
    for (label, value) in event.detail_fields() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<14}", label),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, Style::default().fg(theme::TEXT)),
        ]));
    }

    let height = (lines.len() as u16 + 3).min(area.height.saturating_sub(2));
    let modal_area = centered_rect(70, height, area);
    frame.render_widget(Clear, modal_area);

    // Clamp so G does not scroll past the last field
    let max_scroll = (lines.len() as u16).saturating_sub(height.saturating_sub(2));
    let scroll = app.detail_scroll.min(max_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Event (Esc to close) ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, modal_area);
}

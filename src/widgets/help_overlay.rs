use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::theme;

pub fn render(polling_available: bool, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        section("Navigation"),
        binding("j / k / Up / Down", "Move selection"),
        binding("gg / G", "Go to top / bottom"),
        binding("Ctrl+D / Ctrl+U", "Page down / up"),
        binding("Enter", "Show event details"),
        binding("Esc", "Close overlay"),
        Line::from(""),
        section("Events"),
        binding("r / Ctrl+R / F5", "Refresh events"),
        binding("o", "Open video in browser"),
    ];
    if polling_available {
        lines.push(binding("p", "Pause/resume polling"));
    }

    lines.push(Line::from(""));
    lines.push(section("Commands"));
    lines.push(binding(":refresh, :r", "Refresh events"));
    lines.push(binding(":poll", "Pause/resume polling"));
    lines.push(binding(":q", "Quit"));

    lines.push(Line::from(""));
    lines.push(section("General"));
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

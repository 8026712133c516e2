use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let left_spans: Vec<Span> = vec![
        Span::styled(
            " evlog ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            "Events",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(app.endpoint.as_str(), Style::default().fg(theme::TEXT_DIM)),
    ];

    // Build right-aligned status spans
    let mut right_spans: Vec<Span> = Vec::new();

    let fetch_indicator = match &app.events {
        LoadState::NotLoaded => Span::styled("○ idle", Style::default().fg(theme::TEXT_MUTED)),
        LoadState::Loading => Span::styled("◌ loading...", Style::default().fg(theme::YELLOW)),
        LoadState::Loaded(events) => Span::styled(
            format!("● {} events", events.len()),
            Style::default().fg(theme::GREEN),
        ),
        LoadState::Error(_) => Span::styled("✗ fetch failed", Style::default().fg(theme::RED)),
    };
    right_spans.push(fetch_indicator);

    if !app.base_polling_interval.is_zero() {
        if !app.polling_enabled {
            right_spans.push(Span::styled("  ⏸ paused", Style::default().fg(theme::YELLOW)));
        } else if app.error_count > 0 {
            right_spans.push(Span::styled(
                format!("  ↻ backoff {}s", app.polling_interval.as_secs()),
                Style::default().fg(theme::YELLOW),
            ));
        } else {
            right_spans.push(Span::styled(
                format!("  ↻ every {}s", app.polling_interval.as_secs()),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
    }

    if let Some(at) = app.last_fetched {
        right_spans.push(Span::styled(
            format!("  updated {}", at.format("%H:%M:%S")),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    right_spans.push(Span::raw(" "));

    // Calculate widths and fill gap with spaces
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let gap = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode, Overlay};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints: &[(&str, &str)] = match (&app.input_mode, &app.overlay) {
        (InputMode::Command, _) => &[("Esc", "cancel"), ("Tab", "complete"), ("Enter", "execute")],
        (InputMode::PendingG, _) => &[("g", "top")],
        (_, Overlay::Detail) => &[("j/k", "scroll"), ("o", "video"), ("Esc", "back")],
        (_, Overlay::Help) => &[("?", "close")],
        (InputMode::Normal, Overlay::None) => &[
            ("j/k", "nav"),
            ("Enter", "details"),
            ("o", "video"),
            ("r", "refresh"),
            ("p", "poll"),
            (":", "cmd"),
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

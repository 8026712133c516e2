use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::input::commands::matching_commands;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }

    let mut spans = vec![
        Span::styled(":", Style::default().fg(theme::YELLOW)),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(theme::TEXT)),
    ];

    // Ghost completion while the command word is still being typed
    if !app.input_buffer.is_empty() && !app.input_buffer.contains(' ') {
        let typed = app.input_buffer.as_str();
        if let Some(cmd) = matching_commands(typed).first() {
            if let Some(ghost) = cmd.name.strip_prefix(typed) {
                spans.push(Span::styled(ghost, Style::default().fg(theme::TEXT_MUTED)));
            }
        }
    }

    spans.push(Span::styled("_", Style::default().fg(theme::TEXT_MUTED)));

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

pub fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }

    let input_cmd = app.input_buffer.split_whitespace().next().unwrap_or("");
    let matches = matching_commands(input_cmd);

    let line = if matches.is_empty() {
        Line::from(Span::styled(
            " No matching commands",
            Style::default().fg(theme::TEXT_MUTED),
        ))
    } else {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, cmd) in matches.iter().enumerate() {
            let cmd_style = if i == 0 {
                Style::default().fg(theme::ACCENT)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            spans.push(Span::styled(format!(":{}", cmd.name), cmd_style));
            for alias in cmd.aliases {
                spans.push(Span::styled(
                    format!("|{}", alias),
                    Style::default().fg(theme::TEXT_MUTED),
                ));
            }
            spans.push(Span::styled(
                format!(" {}  ", cmd.description),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
        Line::from(spans)
    };

    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}

pub mod command_input;
pub mod error_toast;
pub mod event_detail;
pub mod events_table;
pub mod footer;
pub mod header_bar;
pub mod help_overlay;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{App, InputMode, Overlay};
use crate::theme;

/// Draw the whole screen for the current app state.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_DARK)), area);

    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Fill(1),   // Events table
        Constraint::Length(1), // Footer / command line
    ])
    .split(area);

    header_bar::render(app, frame, layout[0]);
    events_table::render(app, frame, layout[1]);

    if app.input_mode == InputMode::Command {
        let suggestions = Rect {
            y: layout[1].bottom().saturating_sub(1),
            height: 1,
            ..layout[1]
        };
        command_input::render_suggestions(app, frame, suggestions);
        command_input::render(app, frame, layout[2]);
    } else {
        footer::render(app, frame, layout[2]);
    }

    match app.overlay {
        Overlay::Help => help_overlay::render(!app.base_polling_interval.is_zero(), frame, area),
        Overlay::Detail => event_detail::render(app, frame, area),
        Overlay::None => {}
    }

    error_toast::render(app, frame, area);
}

pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

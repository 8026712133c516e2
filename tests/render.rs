use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;

use evlog::action::Action;
use evlog::app::{App, Effect};
use evlog::domain::EventRecord;
use evlog::widgets;

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
    terminal.draw(|frame| widgets::render(app, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn start_refresh(app: &mut App) -> u64 {
    match app.update(Action::Refresh).as_slice() {
        [Effect::LoadEvents { ticket }] => *ticket,
        other => panic!("unexpected effects: {:?}", other),
    }
}

fn record(value: serde_json::Value) -> EventRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn loading_state_shows_placeholder_under_header() {
    let mut app = App::new("http://localhost:5000/api/events".to_string());
    start_refresh(&mut app);
    let screen = draw(&mut app);
    assert!(screen.contains("Timestamp"));
    assert!(screen.contains("Loading events..."));
}

#[test]
fn error_state_shows_retry_message() {
    let mut app = App::new("http://localhost:5000/api/events".to_string());
    let ticket = start_refresh(&mut app);
    app.update(Action::EventsFailed {
        ticket,
        message: "HTTP error! status: 503".to_string(),
    });
    let screen = draw(&mut app);
    assert!(screen.contains("Error loading events. Please try again."));
    assert!(!screen.contains("Loading events..."));
    assert!(!screen.contains("status: 503"));
}

fn failed_screen(message: &str) -> String {
    let mut app = App::new("http://localhost:5000/api/events".to_string());
    let ticket = start_refresh(&mut app);
    app.update(Action::EventsFailed {
        ticket,
        message: message.to_string(),
    });
    draw(&mut app)
}

#[test]
fn every_failure_kind_looks_the_same() {
    let status = failed_screen("HTTP error! status: 500");
    assert_eq!(status, failed_screen("connection error: refused"));
    assert_eq!(status, failed_screen("parse error: expected value at line 1 column 1"));
    assert_eq!(status, failed_screen("timeout"));
}

#[test]
fn rows_show_links_and_placeholders() {
    let mut app = App::new("http://localhost:5000/api/events".to_string());
    let ticket = start_refresh(&mut app);
    app.update(Action::EventsLoaded {
        ticket,
        events: vec![
            record(json!({ "id": 11, "tag_id": "TAG-A", "video_url": "https://x/v.mp4" })),
            record(json!({ "id": 12 })),
        ],
    });

    let screen = draw(&mut app);
    assert!(screen.contains("TAG-A"));
    assert!(screen.contains("View Video"));
    assert!(screen.contains("No video"));
    assert!(screen.contains("N/A"));
    assert!(screen.contains("2 events"));
}

#[test]
fn detail_overlay_lists_fields() {
    let mut app = App::new("http://localhost:5000/api/events".to_string());
    let ticket = start_refresh(&mut app);
    app.update(Action::EventsLoaded {
        ticket,
        events: vec![record(json!({ "id": 3, "unit_id": "GU-07", "direction": "OUT" }))],
    });
    app.update(Action::Select);

    let screen = draw(&mut app);
    assert!(screen.contains("GU-07"));
    assert!(screen.contains("OUT"));
}

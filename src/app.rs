use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ratatui::widgets::TableState;

use crate::action::Action;
use crate::domain::{EventRecord, EventRow};

pub const LOADING_MESSAGE: &str = "Loading events...";
pub const EMPTY_MESSAGE: &str = "No events found.";
pub const ERROR_MESSAGE: &str = "Error loading events. Please try again.";

/// Columns of the events table: id, timestamp, tag, video.
pub const COLUMN_COUNT: usize = 4;

const ERROR_TOAST_TTL: Duration = Duration::from_secs(5);
const MAX_POLL_BACKOFF_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Detail,
}

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// What the table body currently shows: either one placeholder row spanning
/// every column, or one row per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Placeholder(&'static str),
    Rows(Vec<EventRow>),
}

impl TableBody {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Placeholder(_) => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadEvents { ticket: u64 },
    OpenVideo(String),
    Quit,
}

pub struct App {
    // View state
    pub input_mode: InputMode,
    pub overlay: Overlay,

    // Source
    pub endpoint: String,

    // Event data
    pub events: LoadState<Vec<EventRecord>>,
    pub table_state: TableState,
    pub detail_scroll: u16,
    /// Ticket of the most recently issued refresh. Responses for older
    /// tickets are dropped.
    pub latest_ticket: u64,
    pub last_fetched: Option<DateTime<Local>>,

    // Input
    pub input_buffer: String,

    // Polling
    pub polling_enabled: bool,
    pub polling_interval: Duration,
    pub base_polling_interval: Duration,
    pub last_refresh: Option<Instant>,
    pub error_count: u32,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
}

impl App {
    pub fn new(endpoint: String) -> Self {
        Self {
            input_mode: InputMode::Normal,
            overlay: Overlay::None,

            endpoint,

            events: LoadState::NotLoaded,
            table_state: TableState::default(),
            detail_scroll: 0,
            latest_ticket: 0,
            last_fetched: None,

            input_buffer: String::new(),

            polling_enabled: false,
            polling_interval: Duration::ZERO,
            base_polling_interval: Duration::ZERO,
            last_refresh: None,
            error_count: 0,

            should_quit: false,
            last_error: None,
        }
    }

    /// Enable periodic refreshes. A zero interval leaves polling off.
    pub fn with_polling(mut self, interval: Duration) -> Self {
        self.base_polling_interval = interval;
        self.polling_interval = interval;
        self.polling_enabled = !interval.is_zero();
        self
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale error toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > ERROR_TOAST_TTL {
                self.last_error = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                if self.overlay == Overlay::Detail {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else {
                    self.navigate_up();
                }
                vec![]
            }
            Action::NavigateDown => {
                if self.overlay == Overlay::Detail {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                } else {
                    self.navigate_down();
                }
                vec![]
            }
            Action::NavigateTop => {
                self.input_mode = InputMode::Normal;
                if self.overlay == Overlay::Detail {
                    self.detail_scroll = 0;
                } else if self.event_count() > 0 {
                    self.table_state.select(Some(0));
                }
                vec![]
            }
            Action::NavigateBottom => {
                let len = self.event_count();
                if self.overlay == Overlay::Detail {
                    self.detail_scroll = u16::MAX;
                } else if len > 0 {
                    self.table_state.select(Some(len - 1));
                }
                vec![]
            }
            Action::PageUp => {
                for _ in 0..self.page_height() {
                    self.navigate_up();
                }
                vec![]
            }
            Action::PageDown => {
                for _ in 0..self.page_height() {
                    self.navigate_down();
                }
                vec![]
            }
            Action::Select => {
                if self.selected_event().is_some() {
                    self.overlay = Overlay::Detail;
                    self.detail_scroll = 0;
                }
                vec![]
            }
            Action::Back => {
                if self.input_mode == InputMode::PendingG {
                    self.input_mode = InputMode::Normal;
                } else if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                }
                vec![]
            }

            // Vim chord
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            Action::OpenVideo => match self.selected_event().and_then(|e| e.video_url()) {
                Some(url) => vec![Effect::OpenVideo(url.to_string())],
                None => {
                    self.last_error = Some(("selected event has no video".to_string(), Instant::now()));
                    vec![]
                }
            },

            // UI
            Action::OpenCommandInput => {
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
                vec![]
            }
            Action::CloseOverlay => {
                if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                } else if self.input_mode != InputMode::Normal {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
                vec![]
            }
            Action::SubmitCommandInput(cmd) => {
                self.input_mode = InputMode::Normal;
                let effects = self.execute_command(&cmd);
                self.input_buffer.clear();
                effects
            }
            Action::UpdateInputBuffer(buf) => {
                self.input_buffer = buf;
                vec![]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Data responses
            Action::EventsLoaded { ticket, events } => {
                if !self.is_current(ticket) {
                    return vec![];
                }
                tracing::debug!(ticket, count = events.len(), "rendering events");
                self.events = LoadState::Loaded(events);
                self.last_fetched = Some(Local::now());
                self.last_refresh = Some(Instant::now());
                self.reset_backoff();
                self.clamp_selection();
                vec![]
            }
            Action::EventsFailed { ticket, message } => {
                if !self.is_current(ticket) {
                    return vec![];
                }
                // The cause was already logged by the worker; the table shows
                // the same error row whatever it was.
                self.events = LoadState::Error(message);
                self.table_state.select(None);
                self.last_refresh = Some(Instant::now());
                self.error_count += 1;
                self.apply_backoff();
                vec![]
            }

            // App control
            Action::Refresh => self.refresh_events(),
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => {
                if self.polling_enabled && !self.events.is_loading() {
                    let should_poll = self
                        .last_refresh
                        .map(|t| t.elapsed() >= self.polling_interval)
                        .unwrap_or(true);
                    if should_poll {
                        return self.refresh_events();
                    }
                }
                vec![]
            }
            Action::Error(msg) => {
                self.last_error = Some((msg, Instant::now()));
                vec![]
            }
            Action::ClearError => {
                self.last_error = None;
                vec![]
            }
            Action::TogglePolling => {
                if self.base_polling_interval.is_zero() {
                    self.last_error = Some((
                        "polling is off: start with --poll-interval <secs>".to_string(),
                        Instant::now(),
                    ));
                } else {
                    self.polling_enabled = !self.polling_enabled;
                }
                vec![]
            }
        }
    }

    /// Put the table into the loading state and ask for a fresh event list.
    /// Every call supersedes any refresh still in flight.
    pub fn refresh_events(&mut self) -> Vec<Effect> {
        self.latest_ticket += 1;
        self.events = LoadState::Loading;
        self.table_state.select(None);
        if self.overlay == Overlay::Detail {
            self.overlay = Overlay::None;
        }
        self.last_refresh = Some(Instant::now());
        vec![Effect::LoadEvents {
            ticket: self.latest_ticket,
        }]
    }

    pub fn table_body(&self) -> TableBody {
        match &self.events {
            LoadState::NotLoaded => TableBody::Rows(vec![]),
            LoadState::Loading => TableBody::Placeholder(LOADING_MESSAGE),
            LoadState::Error(_) => TableBody::Placeholder(ERROR_MESSAGE),
            LoadState::Loaded(events) if events.is_empty() => TableBody::Placeholder(EMPTY_MESSAGE),
            LoadState::Loaded(events) => {
                TableBody::Rows(events.iter().map(EventRecord::to_row).collect())
            }
        }
    }

    pub fn selected_event(&self) -> Option<&EventRecord> {
        let events = self.events.data()?;
        events.get(self.table_state.selected()?)
    }

    pub fn event_count(&self) -> usize {
        self.events.data().map(Vec::len).unwrap_or(0)
    }

    fn is_current(&self, ticket: u64) -> bool {
        if ticket == self.latest_ticket {
            return true;
        }
        tracing::warn!(
            ticket,
            latest = self.latest_ticket,
            "discarding response from superseded refresh"
        );
        false
    }

    fn execute_command(&mut self, cmd: &str) -> Vec<Effect> {
        let command = cmd.split_whitespace().next().unwrap_or("").to_lowercase();

        match command.as_str() {
            "refresh" | "r" => self.refresh_events(),
            "poll" => self.update(Action::TogglePolling),
            "help" | "h" => {
                self.overlay = Overlay::Help;
                vec![]
            }
            "quit" | "q" => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            "" => vec![],
            other => {
                self.last_error = Some((format!("unknown command: {}", other), Instant::now()));
                vec![]
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.event_count();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0).min(len - 1);
        self.table_state.select(Some(selected));
    }

    fn navigate_up(&mut self) {
        if self.event_count() == 0 {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(selected.saturating_sub(1)));
    }

    fn navigate_down(&mut self) {
        let len = self.event_count();
        if len == 0 {
            return;
        }
        let next = self.table_state.selected().map(|i| i + 1).unwrap_or(0);
        self.table_state.select(Some(next.min(len - 1)));
    }

    fn reset_backoff(&mut self) {
        self.error_count = 0;
        self.polling_interval = self.base_polling_interval;
    }

    /// Doubles the interval per consecutive failure. The cap never drops
    /// below the configured interval.
    fn apply_backoff(&mut self) {
        let base = self.base_polling_interval.as_secs();
        let multiplier = 2u64.pow(self.error_count.min(5));
        let backoff_secs = base
            .saturating_mul(multiplier)
            .min(base.max(MAX_POLL_BACKOFF_SECS));
        self.polling_interval = Duration::from_secs(backoff_secs);
    }

    fn page_height(&self) -> usize {
        20 // approximate; could be made dynamic
    }
}

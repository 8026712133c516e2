use crate::domain::EventRecord;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    PageUp,
    PageDown,
    Select,
    Back,

    // Vim chord
    EnterPendingG,

    // Event actions
    OpenVideo,

    // UI
    OpenCommandInput,
    CloseOverlay,
    SubmitCommandInput(String),
    UpdateInputBuffer(String),
    ToggleHelp,

    // Data responses, tagged with the ticket of the refresh that asked
    EventsLoaded { ticket: u64, events: Vec<EventRecord> },
    EventsFailed { ticket: u64, message: String },

    // App control
    Refresh,
    Quit,
    Tick,
    Error(String),
    ClearError,
    TogglePolling,
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::EventRecord;

/// Why a fetch failed. All variants surface to the user as the same error
/// row; the distinction only reaches the log.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait EventsClient: Send + Sync {
    /// Fetch the current event list.
    async fn list_events(&self) -> ClientResult<Vec<EventRecord>>;

    /// Human-readable location of the event source, for the header bar.
    fn endpoint(&self) -> String;
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{ClientError, ClientResult, EventsClient};
use crate::domain::{decode_events, EventRecord};

/// Resolved against the base URL's origin, like a root-relative link.
pub const EVENTS_PATH: &str = "/api/events";

pub struct HttpEventsClient {
    client: Client,
    events_url: Url,
}

impl HttpEventsClient {
    pub fn new(base_url: &Url, timeout: Duration) -> ClientResult<Self> {
        let events_url = base_url
            .join(EVENTS_PATH)
            .map_err(|e| ClientError::ConfigError(format!("invalid base url {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        tracing::debug!(url = %events_url, ?timeout, "created events client");

        Ok(Self { client, events_url })
    }

    pub fn events_url(&self) -> &Url {
        &self.events_url
    }
}

#[async_trait]
impl EventsClient for HttpEventsClient {
    async fn list_events(&self) -> ClientResult<Vec<EventRecord>> {
        let response = self
            .client
            .get(self.events_url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        decode_events(&body).map_err(|e| ClientError::ParseError(e.to_string()))
    }

    fn endpoint(&self) -> String {
        self.events_url.to_string()
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::ConnectionError(err.to_string())
    }
}

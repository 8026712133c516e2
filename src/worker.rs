use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::action::Action;
use crate::client::EventsClient;

#[derive(Debug)]
pub enum WorkerRequest {
    LoadEvents { ticket: u64 },
}

#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<WorkerRequest>,
}

impl WorkerHandle {
    /// Queue a request. Returns false once the worker has shut down.
    pub fn send(&self, request: WorkerRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Runs fetches off the UI task. At most one fetch is in flight: a new
/// request aborts the previous one, so only the latest refresh can report.
pub struct EventsWorker {
    client: Arc<dyn EventsClient>,
    rx: mpsc::UnboundedReceiver<WorkerRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl EventsWorker {
    pub fn new(
        client: Arc<dyn EventsClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, WorkerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = WorkerHandle { tx };
        let worker = Self {
            client,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        let mut in_flight: Option<JoinHandle<()>> = None;

        while let Some(request) = self.rx.recv().await {
            if self.action_tx.is_closed() {
                break;
            }

            match request {
                WorkerRequest::LoadEvents { ticket } => {
                    if let Some(previous) = in_flight.take() {
                        if !previous.is_finished() {
                            tracing::debug!(ticket, "cancelling superseded fetch");
                            previous.abort();
                        }
                    }

                    let client = Arc::clone(&self.client);
                    let action_tx = self.action_tx.clone();
                    in_flight = Some(tokio::spawn(async move {
                        let action = fetch_events(client.as_ref(), ticket).await;
                        let _ = action_tx.send(action);
                    }));
                }
            }
        }

        if let Some(task) = in_flight {
            task.abort();
        }
        tracing::debug!("events worker stopped");
    }
}

async fn fetch_events(client: &dyn EventsClient, ticket: u64) -> Action {
    let span = tracing::info_span!("fetch_events", ticket, request_id = %Uuid::new_v4());

    match client.list_events().instrument(span.clone()).await {
        Ok(events) => {
            span.in_scope(|| tracing::debug!(count = events.len(), "fetched events"));
            Action::EventsLoaded { ticket, events }
        }
        Err(e) => {
            span.in_scope(|| tracing::error!(error = ?e, "could not fetch events: {}", e));
            Action::EventsFailed {
                ticket,
                message: e.to_string(),
            }
        }
    }
}

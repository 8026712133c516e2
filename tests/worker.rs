use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;

use evlog::action::Action;
use evlog::app::{App, TableBody, ERROR_MESSAGE};
use evlog::client::{ClientError, ClientResult, EventsClient};
use evlog::domain::EventRecord;
use evlog::worker::{EventsWorker, WorkerRequest};

/// The first call hangs forever; later calls answer immediately with a
/// single event tagged with the call number.
struct HangThenAnswer {
    calls: AtomicUsize,
}

#[async_trait]
impl EventsClient for HangThenAnswer {
    async fn list_events(&self) -> ClientResult<Vec<EventRecord>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            std::future::pending::<()>().await;
        }
        let record = serde_json::from_value(json!({ "id": call, "tag_id": format!("call-{}", call) }))
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        Ok(vec![record])
    }

    fn endpoint(&self) -> String {
        "mock://hang-then-answer".to_string()
    }
}

struct AlwaysDown;

#[async_trait]
impl EventsClient for AlwaysDown {
    async fn list_events(&self) -> ClientResult<Vec<EventRecord>> {
        Err(ClientError::ConnectionError("connection refused".to_string()))
    }

    fn endpoint(&self) -> String {
        "mock://down".to_string()
    }
}

async fn next_action(rx: &mut mpsc::UnboundedReceiver<Action>) -> Option<Action> {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("worker answered in time")
}

#[tokio::test]
async fn newer_refresh_cancels_the_one_in_flight() {
    let client = Arc::new(HangThenAnswer {
        calls: AtomicUsize::new(0),
    });
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (worker, handle) = EventsWorker::new(client.clone(), action_tx);
    tokio::spawn(worker.run());

    assert!(handle.send(WorkerRequest::LoadEvents { ticket: 1 }));
    // Let the first fetch start before superseding it
    while client.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    assert!(handle.send(WorkerRequest::LoadEvents { ticket: 2 }));

    match next_action(&mut action_rx).await {
        Some(Action::EventsLoaded { ticket, events }) => {
            assert_eq!(ticket, 2);
            assert_eq!(events.len(), 1);
        }
        other => panic!("unexpected action: {:?}", other),
    }

    // Once the worker stops, the aborted fetch must not have reported anything
    drop(handle);
    assert!(next_action(&mut action_rx).await.is_none());
}

#[tokio::test]
async fn failures_are_reported_with_their_ticket() {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (worker, handle) = EventsWorker::new(Arc::new(AlwaysDown), action_tx);
    tokio::spawn(worker.run());

    handle.send(WorkerRequest::LoadEvents { ticket: 7 });
    let action = next_action(&mut action_rx).await.expect("an action");

    let mut app = App::new("mock://down".to_string());
    for _ in 0..7 {
        app.update(Action::Refresh);
    }
    match &action {
        Action::EventsFailed { ticket, message } => {
            assert_eq!(*ticket, 7);
            assert!(message.contains("connection refused"));
        }
        other => panic!("unexpected action: {:?}", other),
    }
    app.update(action);
    assert_eq!(app.table_body(), TableBody::Placeholder(ERROR_MESSAGE));
}

#[tokio::test]
async fn worker_stops_when_handle_is_dropped() {
    let (action_tx, _action_rx) = mpsc::unbounded_channel();
    let (worker, handle) = EventsWorker::new(Arc::new(AlwaysDown), action_tx);
    let task = tokio::spawn(worker.run());

    drop(handle);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("worker exited")
        .expect("worker did not panic");
}

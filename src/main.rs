use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use evlog::action::Action;
use evlog::app::{App, Effect};
use evlog::client::{EventsClient, HttpEventsClient};
use evlog::config::{Cli, ConfigFile, Settings};
use evlog::event::{key_to_action, AppEvent, RawEventHandler};
use evlog::tui::Tui;
use evlog::worker::{EventsWorker, WorkerHandle, WorkerRequest};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let file = ConfigFile::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file)?;

    // stdout belongs to the TUI, so logs only go to a file
    let _log_guard = settings.log_file.as_deref().map(init_logging).transpose()?;

    if let Some(ref message) = settings.welcome {
        tracing::debug!(%message, "welcome message");
    }

    run_tui(settings).await
}

fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    Ok(guard)
}

async fn run_tui(settings: Settings) -> Result<()> {
    let client: Arc<dyn EventsClient> =
        Arc::new(HttpEventsClient::new(&settings.base_url, settings.timeout)?);
    tracing::info!(endpoint = %client.endpoint(), "starting evlog");

    let mut app = App::new(client.endpoint()).with_polling(settings.poll_interval);

    // Set up channels
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

    let (worker, worker_handle) = EventsWorker::new(client, action_tx.clone());
    tokio::spawn(worker.run());

    let mut terminal = evlog::tui::init()?;
    let result = main_loop(&mut terminal, &mut app, &worker_handle, action_tx, action_rx).await;
    evlog::tui::restore()?;
    result
}

async fn main_loop(
    terminal: &mut Tui,
    app: &mut App,
    worker: &WorkerHandle,
    action_tx: mpsc::UnboundedSender<Action>,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
) -> Result<()> {
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    // Initial load
    let effects = app.update(Action::Refresh);
    handle_effects(effects, worker, &action_tx);

    loop {
        terminal.draw(|frame| evlog::widgets::render(app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => {
                        key_to_action(key, &app.input_mode, &app.overlay, &app.input_buffer)
                    }
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, worker, &action_tx);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, worker, &action_tx);
            }
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_effects(
    effects: Vec<Effect>,
    worker: &WorkerHandle,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    for effect in effects {
        match effect {
            Effect::LoadEvents { ticket } => {
                if !worker.send(WorkerRequest::LoadEvents { ticket }) {
                    tracing::error!(ticket, "events worker stopped; refresh dropped");
                    let _ = action_tx.send(Action::EventsFailed {
                        ticket,
                        message: "events worker stopped".to_string(),
                    });
                }
            }
            Effect::OpenVideo(url) => {
                tracing::info!(%url, "opening video");
                if let Err(e) = open::that_detached(&url) {
                    tracing::error!(error = %e, %url, "could not open video");
                    let _ = action_tx.send(Action::Error(format!("could not open video: {}", e)));
                }
            }
            Effect::Quit => {}
        }
    }
}

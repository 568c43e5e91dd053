use crate::client::{RecordStore, RestClient};
use crate::config::Config;
use crate::schema::schema_for;
use crate::ui::app::App;
use crate::ui::controller::{RemoteCommand, ViewController};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Pending remote commands; the UI drops commands beyond this.
const COMMAND_QUEUE: usize = 64;

pub fn run(config: &Config) -> anyhow::Result<()> {
    let entity = schema_for(&config.ui.initial_entity)?;
    let store: Arc<dyn RecordStore> =
        Arc::new(RestClient::new(&config.api).context("Failed to build API client")?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("registrar-remote")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let (mut terminal, guard) = setup_terminal().context("Failed to set up terminal")?;
    let tick_rate = Duration::from_millis(config.ui.tick_ms.max(10));
    let events = EventHandler::new(tick_rate);

    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
    runtime.spawn(execute_commands(command_rx, store, events.sender()));

    let controller = ViewController::new(entity, config.ui.page_size);
    let mut app = App::new(
        controller,
        Duration::from_secs(config.ui.notification_seconds),
    );
    app.set_command_sender(command_tx);
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(cols, rows);
    }
    app.start();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Mouse(mouse)) => app.on_mouse(mouse),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(cols, rows)) => app.on_resize(cols, rows),
            Ok(AppEvent::Remote(intent)) => app.dispatch(intent),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    runtime.shutdown_timeout(Duration::from_millis(200));
    Ok(())
}

/// Run each command as its own task. Results are not ordered: the last
/// response to arrive wins.
async fn execute_commands(
    mut commands: mpsc::Receiver<RemoteCommand>,
    store: Arc<dyn RecordStore>,
    events: std::sync::mpsc::Sender<AppEvent>,
) {
    while let Some(command) = commands.recv().await {
        let store = Arc::clone(&store);
        let events = events.clone();
        tokio::spawn(async move {
            let intent = command.execute(store.as_ref()).await;
            let _ = events.send(AppEvent::Remote(intent));
        });
    }
}

//! TUI event loop, input handling, and state management.

mod handlers;
mod render;

use anyhow::Result;
use crossterm::event::{self, Event};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::sync::mpsc;

use crate::{
    config::Config,
    events::UiState,
    input::InputBox,
    shortcuts::Shortcuts,
    storage,
    store::{ScreenStore, ScreensAction},
    ui::Tui,
    worker::{self, WorkerCmd, WorkerEvent},
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;

/// App state shared between input handling and rendering.
pub struct App {
    /// In-memory configuration loaded from `config.toml`.
    pub cfg: Config,
    /// The screen store; the only durable state in the app.
    pub store: ScreenStore,
    /// Frame-local UI state (cursor, status, log).
    pub ui: UiState,
    /// Command channel to the worker.
    pub worker_tx: mpsc::Sender<WorkerCmd>,
    /// Event channel from the worker.
    pub worker_rx: mpsc::Receiver<WorkerEvent>,
    /// URL input popup, `Some` while open.
    pub input_box: Option<InputBox>,
    /// Key binding configuration.
    pub shortcuts: Shortcuts,
}

impl App {
    /// Apply a store action and schedule a best-effort persist of the full
    /// snapshot. Every mutation gets its own write; writes may complete out
    /// of order and the last one wins.
    pub fn dispatch(&mut self, action: ScreensAction) {
        self.store.dispatch(action);
        let snapshot = self.store.state().screens.clone();
        if let Err(e) = self.worker_tx.try_send(WorkerCmd::Persist(snapshot)) {
            tracing::warn!("persist not scheduled: {e}");
        }
    }
}

/// Run the main TUI loop until the user quits.
pub async fn run_app(terminal: &mut Tui) -> Result<()> {
    let cfg_path = PathBuf::from("config.toml");
    let cfg = Config::load_or_default(&cfg_path)?;

    let shortcuts_path = PathBuf::from("shortcut.toml");
    let shortcuts = Shortcuts::load_or_default(&shortcuts_path)?;

    // Command/event channels for worker communication.
    let (tx_cmd, rx_cmd) = mpsc::channel::<WorkerCmd>(64);
    let (tx_ev, rx_ev) = mpsc::channel::<WorkerEvent>(256);

    tokio::spawn(worker::run(rx_cmd, tx_ev, cfg.clone()));

    let mut app = App {
        cfg,
        store: ScreenStore::new(),
        ui: UiState::new(),
        worker_tx: tx_cmd,
        worker_rx: rx_ev,
        input_box: None,
        shortcuts,
    };

    // Load the persisted snapshot exactly once at startup.
    let saved = storage::load_screens(Path::new(&app.cfg.storage.screens_path)).await;
    if !saved.is_empty() {
        let n = saved.len();
        app.dispatch(ScreensAction::SetScreens(saved));
        app.ui.status = format!("Loaded {n} screen(s)");
    }

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Drain worker events before handling input.
        while let Ok(ev) = app.worker_rx.try_recv() {
            handle_worker_event(&mut app, ev);
        }

        // Short poll timeout keeps the UI responsive to worker events.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
        {
            // Ctrl+C always quits, whatever is open.
            if is_ctrl_c(&k) {
                break;
            }
            if handle_key(&mut app, k).await? {
                break;
            }
        }
    }
    Ok(())
}

/// Fold a worker event into the app state.
fn handle_worker_event(app: &mut App, ev: WorkerEvent) {
    match ev {
        WorkerEvent::ScreensImported(screens) => {
            // Commit in document order; the cursor stays where it was.
            let n = screens.len();
            for screen in screens {
                app.dispatch(ScreensAction::AddScreen(screen));
            }
            app.ui.error = None;
            app.ui.note(format!("{n} screen(s) imported and saved"));
        }
        WorkerEvent::ImportFailed(msg) => {
            app.ui.log.push(format!("import failed: {msg}"));
            app.ui.status = "Import failed".into();
            app.ui.error = Some(msg);
        }
        WorkerEvent::TriggerFinished { label, result } => match result {
            Ok(()) => app.ui.note(format!("{label}: OK")),
            Err(e) => app.ui.note(format!("{label}: failed ({e})")),
        },
    }
}

//! Application entry point and runtime initialization.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod config;
mod error;
mod events;
mod grid;
mod import;
mod input;
mod layout;
mod schema;
mod shortcuts;
mod storage;
mod store;
mod ui;
mod worker;

/// Initialize file logging and keep the async guard alive.
fn init_logging() -> Result<WorkerGuard> {
    let log_file = "deck_tui.log";
    // Write straight to a file so the TUI's stdout stays clean.
    let file_appender = tracing_appender::rolling::never(".", log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log_file);
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging()?;
    tracing::info!("app starting");
    let mut terminal = ui::init_terminal()?;
    let res = app::run_app(&mut terminal).await;
    // Always put the terminal back, even on error.
    ui::restore_terminal()?;
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    tracing::info!("app exiting");
    res
}

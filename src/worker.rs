//! Background worker handling network calls and persistence.

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use reqwest::{Client, header::CONTENT_TYPE};
use tokio::sync::mpsc;

use crate::{config::Config, import, schema::Screen, storage};

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerCmd {
    /// Fetch and parse a YAML configuration URL.
    Import { url: String },
    /// POST to a button's endpoint. `label` is echoed back for reporting.
    Trigger { label: String, url: String },
    /// Write the full screens snapshot to disk, best effort.
    Persist(Vec<Screen>),
}

/// Events emitted by the worker for UI updates.
#[derive(Clone, Debug)]
pub enum WorkerEvent {
    /// An import finished; screens arrive in document order.
    ScreensImported(Vec<Screen>),
    /// An import failed as a whole; nothing was produced.
    ImportFailed(String),
    /// A button POST completed, one report per trigger, never retried.
    TriggerFinished { label: String, result: Result<(), String> },
}

/// Main worker loop.
///
/// Commands are received in arrival order but each one runs in its own task:
/// a slow import must not block button triggers, and two overlapping imports
/// interleave their results in arrival order by design. Persist writes may
/// therefore complete out of order; last write wins.
pub async fn run(mut rx: mpsc::Receiver<WorkerCmd>, tx: mpsc::Sender<WorkerEvent>, cfg: Config) {
    // Shared HTTP client for imports and triggers, with the fixed
    // client-side timeout from the config.
    let http = Client::builder()
        .timeout(Duration::from_secs(cfg.network.timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("http client init failed, using defaults: {e}");
            Client::new()
        });
    let screens_path = PathBuf::from(&cfg.storage.screens_path);
    tracing::info!("worker started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            WorkerCmd::Import { url } => {
                tracing::info!("import requested: {url}");
                let http = http.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    match import::import_screens(&http, &url).await {
                        Ok(screens) => {
                            tracing::info!("import succeeded: {} screen(s)", screens.len());
                            let _ = tx.send(WorkerEvent::ScreensImported(screens)).await;
                        }
                        Err(e) => {
                            tracing::error!("import failed: {e}");
                            let _ = tx.send(WorkerEvent::ImportFailed(e.to_string())).await;
                        }
                    }
                });
            }

            WorkerCmd::Trigger { label, url } => {
                tracing::info!("trigger '{label}': POST {url}");
                let http = http.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = send_trigger(&http, &url).await.map_err(|e| e.to_string());
                    if let Err(ref e) = result {
                        tracing::error!("trigger '{label}' failed: {e}");
                    }
                    let _ = tx.send(WorkerEvent::TriggerFinished { label, result }).await;
                });
            }

            WorkerCmd::Persist(screens) => {
                let path = screens_path.clone();
                tokio::spawn(async move {
                    storage::save_screens(&path, &screens).await;
                });
            }
        }
    }
}

/// Fire one webhook POST. The response body is ignored; only 2xx vs failure
/// matters.
async fn send_trigger(http: &Client, url: &str) -> Result<()> {
    http.post(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

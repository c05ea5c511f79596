//! JSON snapshot persistence for the screen list.

use anyhow::Result;
use std::{io::ErrorKind, path::Path};
use tokio::fs;

use crate::schema::Screen;

/// Persist the full screens list, best effort. Failures are logged and
/// swallowed: the in-memory state stays the source of truth for the session.
pub async fn save_screens(path: &Path, screens: &[Screen]) {
    if let Err(e) = try_save(path, screens).await {
        tracing::error!("failed to save screens to {}: {e}", path.display());
    }
}

async fn try_save(path: &Path, screens: &[Screen]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let data = serde_json::to_vec_pretty(screens)?;
    fs::write(path, data).await?;
    Ok(())
}

/// Load the persisted screens list. A missing, empty, or unreadable snapshot
/// yields an empty list, indistinguishable from a first run.
pub async fn load_screens(path: &Path) -> Vec<Screen> {
    match fs::read(path).await {
        Ok(data) if data.is_empty() => Vec::new(),
        Ok(data) => serde_json::from_slice(&data).unwrap_or_else(|e| {
            tracing::error!("failed to parse screens snapshot {}: {e}", path.display());
            Vec::new()
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::error!("failed to read screens snapshot {}: {e}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Button;

    fn sample_screens() -> Vec<Screen> {
        vec![
            Screen {
                id: "1700000000000-0".into(),
                title: "Lights".into(),
                ui: vec![
                    Button { label: "On".into(), span: 3, height: 1, url: "http://x/on".into() },
                    Button { label: "".into(), span: 6, height: 1, url: "".into() },
                ],
            },
            Screen { id: "1700000000000-1".into(), title: "Empty".into(), ui: vec![] },
        ]
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("deck_tui_{}_{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_round_trip_preserves_screens() {
        let path = temp_path("round_trip");
        let screens = sample_screens();
        save_screens(&path, &screens).await;
        let loaded = load_screens(&path).await;
        assert_eq!(loaded, screens);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_snapshot_loads_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path).await;
        assert!(load_screens(&path).await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"not json at all").await.unwrap();
        assert!(load_screens(&path).await.is_empty());
        let _ = fs::remove_file(&path).await;
    }
}

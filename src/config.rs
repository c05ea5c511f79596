//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior for imports and button triggers.
    pub network: NetworkCfg,
    /// Cell metrics for the button grid.
    pub grid: GridCfg,
    /// Where the imported screens are persisted.
    pub storage: StorageCfg,
}

/// Network tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkCfg {
    /// Client-side timeout applied to every request.
    pub timeout_secs: u64,
}

/// Grid geometry in terminal cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCfg {
    /// Height of a height-1 button.
    pub base_height: u16,
    /// Gap between adjacent buttons, also used as the row gap.
    pub gap: u16,
}

/// Persistence targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageCfg {
    /// JSON file holding the full screens snapshot.
    pub screens_path: String,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkCfg { timeout_secs: 10 },
            // A height-1 button is three cells tall: one content line plus
            // its top and bottom border.
            grid: GridCfg { base_height: 3, gap: 1 },
            storage: StorageCfg {
                screens_path: "screens.json".into(),
            },
        }
    }
}

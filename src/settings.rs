use crate::dashboard::planner::MAX_COLUMNS;
use crate::dashboard::JsonFilePersistence;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_dashboard_path() -> String {
    "dashboard.json".into()
}

fn default_columns() -> usize {
    3
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Enable `debug` level logging and honour `RUST_LOG`.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Layout file, or a directory holding `dashboard.json`.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    /// Grid width in cells.
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Place every built-in widget when no saved layout exists.
    #[serde(default = "default_true")]
    pub seed_default_layout: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            dashboard_path: default_dashboard_path(),
            columns: default_columns(),
            seed_default_layout: true,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)?;
        if !(1..=MAX_COLUMNS).contains(&settings.columns) {
            anyhow::bail!(
                "columns must be between 1 and {MAX_COLUMNS}, got {}",
                settings.columns
            );
        }
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn dashboard_file(&self) -> PathBuf {
        JsonFilePersistence::path_for(&self.dashboard_path)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }
}

//! User settings for fintrack

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::models::Currency;
use crate::storage::file_io::write_json_atomic;

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency used when a command doesn't name one
    #[serde(default)]
    pub default_currency: Currency,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How far ahead `upcoming` looks
    #[serde(default = "default_upcoming_horizon_days")]
    pub upcoming_horizon_days: u32,

    /// Snapshot file to use instead of the one under the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_upcoming_horizon_days() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: Currency::default(),
            date_format: default_date_format(),
            upcoming_horizon_days: default_upcoming_horizon_days(),
            snapshot_path: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Snapshot file these settings point at
    pub fn snapshot_file(&self, paths: &FintrackPaths) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| paths.snapshot_file())
    }
}

//! Path management for fintrack
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `fintrack` (`~/.config/fintrack` on
//!    Linux, `~/Library/Application Support/fintrack` on macOS,
//!    `%APPDATA%\fintrack\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FintrackError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FintrackPaths {
    base_dir: PathBuf,
}

impl FintrackPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FintrackError> {
        Self::resolve(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn resolve(override_dir: Option<PathBuf>) -> Result<Self, FintrackError> {
        let base_dir = match override_dir.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "fintrack")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    FintrackError::Config("Could not determine a home directory".into())
                })?,
        };
        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default location of the snapshot file
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join("snapshot.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FintrackError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FintrackError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Check if fintrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

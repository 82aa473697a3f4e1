//! User settings for the rollover ledger
//!
//! Limits for the reset walk and the log filter used by the command line.

use serde::{Deserialize, Serialize};

use super::paths::RolloverPaths;
use crate::error::RolloverError;
use crate::services::reset::{DEFAULT_MAX_MONTHS, DEFAULT_MAX_WORKERS};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Maximum number of months a reset walks per category
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Maximum number of categories reset concurrently
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Default tracing filter when `ROLLOVER_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            max_months: default_max_months(),
            max_workers: default_max_workers(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RolloverPaths) -> Result<Self, RolloverError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not saved yet; `init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| RolloverError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| RolloverError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RolloverPaths) -> Result<(), RolloverError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RolloverError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| RolloverError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject limits that would stop a reset from doing any work
    pub fn validate(&self) -> Result<(), RolloverError> {
        if self.max_months == 0 {
            return Err(RolloverError::Config("max_months must be at least 1".into()));
        }
        if self.max_workers == 0 {
            return Err(RolloverError::Config("max_workers must be at least 1".into()));
        }
        Ok(())
    }
}

//! Path management for the rollover ledger
//!
//! ## Path Resolution Order
//!
//! 1. `ROLLOVER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/rollover-ledger` or `~/.config/rollover-ledger`
//! 3. Windows: `%APPDATA%\rollover-ledger`

use std::path::PathBuf;

use crate::error::RolloverError;

/// Manages all paths used by the rollover ledger
#[derive(Debug, Clone)]
pub struct RolloverPaths {
    base_dir: PathBuf,
}

impl RolloverPaths {
    /// Create a new RolloverPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RolloverError> {
        let base_dir = if let Ok(custom) = std::env::var("ROLLOVER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RolloverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default workbook
    pub fn workbook_file(&self) -> PathBuf {
        self.base_dir.join("workbook.json")
    }

    /// Get the directory CSV exports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), RolloverError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RolloverError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| RolloverError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RolloverError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                RolloverError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("rollover-ledger"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RolloverError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RolloverError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("rollover-ledger"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RolloverPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.workbook_file(), temp_dir.path().join("workbook.json"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RolloverPaths::with_base_dir(temp_dir.path().join("ledger"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
    }
}

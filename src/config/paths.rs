//! Path management for FAM
//!
//! ## Path Resolution Order
//!
//! 1. `FAM_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `fam-cli` (via `directories`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FamError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FAM_CLI_DATA_DIR";

/// Manages all paths used by FAM
#[derive(Debug, Clone)]
pub struct FamPaths {
    /// Base directory for all FAM data
    base_dir: PathBuf,
}

impl FamPaths {
    /// Create a new FamPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, FamError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FamPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FamError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FamError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FamError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if FAM has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FamError> {
    ProjectDirs::from("", "", "fam-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FamError::Config("Could not determine a home directory".into()))
}

//! Path management for gastos
//!
//! ## Path Resolution Order
//!
//! 1. `GASTOS_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `gastos-cli` (e.g.
//!    `~/.config/gastos-cli` on Linux, `%APPDATA%\gastos-cli\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::GastosError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GASTOS_CLI_DATA_DIR";

/// Manages all paths used by gastos
#[derive(Debug, Clone)]
pub struct GastosPaths {
    base_dir: PathBuf,
}

impl GastosPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, GastosError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "gastos-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    GastosError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
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

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), GastosError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GastosError::Io(format!("Failed to create config directory: {}", e)))
    }
}

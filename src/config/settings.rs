//! User settings for gastos
//!
//! Where the backend lives and how values are shown in the terminal.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::GastosPaths;
use crate::backend::http::parse_base_url;
use crate::error::GastosError;

/// Default address of the persistence service
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Date format used when none (or an unusable one) is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// User settings for gastos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether confirmed mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            date_format: default_date_format(),
            currency_symbol: default_currency(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &GastosPaths) -> Result<Self, GastosError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                GastosError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GastosError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if let Err(err) = check_date_format(&settings.date_format) {
                warn!(error = %err, "using {DEFAULT_DATE_FORMAT} instead");
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Not persisted until the user changes something
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GastosPaths) -> Result<(), GastosError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GastosError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GastosError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Change the backend URL after checking that it parses
    pub fn set_api_url(&mut self, url: &str) -> Result<(), GastosError> {
        parse_base_url(url).map_err(|e| GastosError::Config(e.to_string()))?;
        self.api_url = url.trim().to_string();
        Ok(())
    }
}

/// Check that `pattern` is a strftime format chrono can render
pub fn check_date_format(pattern: &str) -> Result<(), GastosError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(GastosError::Config(format!(
            "Invalid date_format {:?}",
            pattern
        )));
    }
    Ok(())
}

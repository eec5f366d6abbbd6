//! Config CLI commands

use clap::Subcommand;

use crate::config::{GastosPaths, Settings};
use crate::error::GastosResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and effective settings
    Show,

    /// Persist the backend base URL
    #[command(name = "set-url")]
    SetUrl {
        /// Base URL, e.g. http://localhost:3000
        url: String,
    },
}

/// Handle a config command. `effective_url` is the URL after flag and
/// environment overrides.
pub fn handle_config_command(
    paths: &GastosPaths,
    settings: &mut Settings,
    effective_url: &str,
    cmd: ConfigCommands,
) -> GastosResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("gastos configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  API URL:         {}", effective_url);
            if effective_url != settings.api_url {
                println!("    (saved: {})", settings.api_url);
            }
            println!("  Date format:     {}", settings.date_format);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit log:       {}", if settings.audit_enabled { "on" } else { "off" });
        }

        ConfigCommands::SetUrl { url } => {
            settings.set_api_url(&url)?;
            settings.save(paths)?;
            println!("API URL set to {}", settings.api_url);
        }
    }

    Ok(())
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod config;
pub mod expense;
pub mod prompt;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use prompt::DialoguerConfirm;

use crate::services::Synced;

/// The mutation went through but the follow-up refresh did not
fn warn_if_stale<T>(synced: &Synced<T>) {
    if let Some(err) = &synced.refresh_error {
        eprintln!("Warning: change saved, but refreshing failed: {}", err);
    }
}

//! Configuration module for gastos
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence (backend URL, display preferences)

pub mod paths;
pub mod settings;

pub use paths::GastosPaths;
pub use settings::{check_date_format, Settings, DEFAULT_DATE_FORMAT};

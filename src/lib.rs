//! gastos - terminal client for a personal expense tracker
//!
//! Expenses and categories are owned by an external backend service. This
//! crate holds the client side: the domain model, the stores that mirror the
//! backend's collections, and the "mutate, then refresh" protocol that keeps
//! them in sync.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Categories, expenses, installments and typed ids
//! - `backend`: The `Backend` port with HTTP and in-memory adapters
//! - `services`: Stores, form validation and the sync controller
//! - `audit`: Audit log of confirmed mutations
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `logging`: Diagnostic logging setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gastos::backend::HttpBackend;
//! use gastos::services::SyncController;
//!
//! let backend = Arc::new(HttpBackend::new("http://localhost:3000")?);
//! let controller = SyncController::new(backend);
//! let report = controller.load_all().await;
//! ```

pub mod audit;
pub mod backend;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{GastosError, GastosResult};

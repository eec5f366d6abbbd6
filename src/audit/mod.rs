//! Audit trail for gastos
//!
//! Every mutation the backend confirms (creating or deleting a category or an
//! expense) is appended to a local, line-delimited JSON log so the user can
//! see what this client changed and when.
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Category,
//!     "4",
//!     Some("Comida".to_string()),
//!     &body,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

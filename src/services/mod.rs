//! Service layer for gastos
//!
//! The stores own the in-memory view of backend state and expose the only
//! operations that change it; the validator gatekeeps new expenses and the
//! sync module sequences every mutation with a refresh.

pub mod category;
pub mod expense;
pub mod sync;
pub mod validator;

pub use category::{AssumeYes, CategoryState, CategoryStore, Confirm, Deletion};
pub use expense::{ExpenseState, ExpenseStore};
pub use sync::{LoadReport, SyncController, Synced};
pub use validator::{validate_expense_form, ExpenseForm, FormCheck, InvalidReason};

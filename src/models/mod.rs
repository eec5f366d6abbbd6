//! Core data models for gastos
//!
//! This module contains the data structures of the expense-tracking domain:
//! categories, expenses and installment metadata, together with their wire
//! encodings.

pub mod category;
pub mod expense;
pub mod ids;
pub mod installment;

pub use category::{Category, CategoryValidationError, NewCategory};
pub use expense::{Expense, NewExpense};
pub use ids::{CategoryId, ExpenseId};
pub use installment::Installment;

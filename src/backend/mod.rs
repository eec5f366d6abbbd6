//! Backend access layer for gastos
//!
//! The persistence service is an external REST API. [`Backend`] is the port
//! the stores talk to; [`HttpBackend`] is the reqwest adapter used by the
//! binary and [`MemoryBackend`] an in-process stand-in used by tests.

pub mod http;
pub mod memory;
#[cfg(test)]
pub(crate) mod test_server;

pub use http::HttpBackend;
pub use memory::{CallKind, MemoryBackend};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, CategoryId, Expense, ExpenseId, NewCategory, NewExpense};

/// Failure talking to the backend.
///
/// Callers do not branch on the variant; it only shapes the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

/// REST surface of the persistence service.
///
/// A create succeeds on any 2xx status. The created entity is `None` when the
/// response body is empty or not shaped like the entity; the follow-up
/// refresh is what the stores trust.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /categorias`
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError>;

    /// `POST /categorias`
    async fn create_category(
        &self,
        body: &NewCategory,
    ) -> Result<Option<Category>, BackendError>;

    /// `DELETE /categorias/{id}`
    async fn delete_category(&self, id: CategoryId) -> Result<(), BackendError>;

    /// `GET /gastos`
    async fn list_expenses(&self) -> Result<Vec<Expense>, BackendError>;

    /// `POST /gastos`
    async fn create_expense(&self, body: &NewExpense) -> Result<Option<Expense>, BackendError>;

    /// `DELETE /gastos/{id}`
    async fn delete_expense(&self, id: ExpenseId) -> Result<(), BackendError>;
}

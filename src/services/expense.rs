//! Expense store
//!
//! Holds the known set of expenses and the transient expense form. A form
//! that fails validation never produces a request. Deleting an expense needs
//! no confirmation.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::sync::{self, InFlight, Synced, Tracked};
use super::validator::ExpenseForm;
use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backend::{Backend, BackendError};
use crate::error::{GastosError, GastosResult};
use crate::models::{Expense, ExpenseId, NewExpense};

const LOAD_FAILED: &str = "Failed to load expenses";
const CREATE_FAILED: &str = "Failed to create expense";
const DELETE_FAILED: &str = "Failed to delete expense";

/// Snapshot of everything the expense views render from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseState {
    /// Expenses as of the last successful fetch
    pub expenses: Vec<Expense>,
    /// Transient input for the next expense
    pub form: ExpenseForm,
    /// Short message for the last failed backend call, if not yet superseded
    pub error: Option<String>,
    /// Requests currently in flight
    pub in_flight: usize,
}

impl ExpenseState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }
}

impl Tracked for ExpenseState {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }
}

/// State container for expenses
pub struct ExpenseStore<B> {
    backend: Arc<B>,
    state: watch::Sender<ExpenseState>,
    audit: Option<AuditLogger>,
}

impl<B: Backend> ExpenseStore<B> {
    /// Create an empty store
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: watch::Sender::new(ExpenseState::default()),
            audit: None,
        }
    }

    /// Record confirmed mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Receive a notification whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<ExpenseState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ExpenseState {
        self.state.borrow().clone()
    }

    /// Expenses as of the last successful fetch
    pub fn expenses(&self) -> Vec<Expense> {
        self.state.borrow().expenses.clone()
    }

    /// Current error message, if any
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Edit the transient form in place
    pub fn update_form(&self, edit: impl FnOnce(&mut ExpenseForm)) {
        self.state.send_modify(|s| edit(&mut s.form));
    }

    /// Clear the transient form
    pub fn reset_form(&self) {
        self.state.send_modify(|s| s.form = ExpenseForm::default());
    }

    /// Fetch all expenses and replace the collection.
    ///
    /// On failure the previous collection is kept.
    pub async fn list(&self) -> GastosResult<Vec<Expense>> {
        let _busy = InFlight::new(&self.state);
        match self.backend.list_expenses().await {
            Ok(expenses) => {
                debug!(count = expenses.len(), "expenses loaded");
                self.state.send_modify(|s| {
                    s.expenses = expenses.clone();
                    s.error = None;
                });
                Ok(expenses)
            }
            Err(err) => Err(self.record_failure(LOAD_FAILED, err)),
        }
    }

    /// Validate `form`, create the expense, reset the form and refresh.
    ///
    /// An invalid form returns a validation error without any request.
    pub async fn create(&self, form: &ExpenseForm) -> GastosResult<Synced<Option<Expense>>> {
        let body = form.to_submission().map_err(|reason| {
            debug!(%reason, "expense form rejected");
            GastosError::Validation(reason.to_string())
        })?;
        sync::mutate_then_refresh(self.submit_create(&body), || self.list()).await
    }

    /// Create an expense from the transient form
    pub async fn submit_form(&self) -> GastosResult<Synced<Option<Expense>>> {
        let form = self.state.borrow().form.clone();
        self.create(&form).await
    }

    /// Delete an expense, then refresh
    pub async fn delete(&self, id: ExpenseId) -> GastosResult<Synced<ExpenseId>> {
        let description = self.state.borrow().find(id).map(|e| e.description.clone());
        sync::mutate_then_refresh(self.submit_delete(id, description), || self.list()).await
    }

    async fn submit_create(&self, body: &NewExpense) -> GastosResult<Option<Expense>> {
        let _busy = InFlight::new(&self.state);
        match self.backend.create_expense(body).await {
            Ok(created) => {
                let id = created.as_ref().map(|e| e.id);
                info!(id = ?id, description = %body.description, "expense created");
                self.state.send_modify(|s| {
                    s.form = ExpenseForm::default();
                    s.error = None;
                });
                sync::record_audit(
                    self.audit.as_ref(),
                    AuditEntry::create(
                        EntityType::Expense,
                        sync::audit_id(id),
                        Some(body.description.clone()),
                        body,
                    ),
                );
                Ok(created)
            }
            Err(err) => Err(self.record_failure(CREATE_FAILED, err)),
        }
    }

    async fn submit_delete(
        &self,
        id: ExpenseId,
        description: Option<String>,
    ) -> GastosResult<ExpenseId> {
        let _busy = InFlight::new(&self.state);
        match self.backend.delete_expense(id).await {
            Ok(()) => {
                info!(%id, "expense deleted");
                self.state.send_modify(|s| s.error = None);
                sync::record_audit(
                    self.audit.as_ref(),
                    AuditEntry::delete(EntityType::Expense, id.to_string(), description),
                );
                Ok(id)
            }
            Err(err) => Err(self.record_failure(DELETE_FAILED, err)),
        }
    }

    fn record_failure(&self, summary: &str, err: BackendError) -> GastosError {
        warn!(error = %err, "{summary}");
        self.state.send_modify(|s| s.error = Some(summary.to_string()));
        GastosError::fetch(format!("{summary}: {err}"))
    }
}

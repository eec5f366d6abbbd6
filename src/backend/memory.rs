//! In-memory backend
//!
//! Behaves like the REST service closely enough to exercise the stores:
//! assigns ids, joins each expense with its category on read (so deleting a
//! category leaves a dangling reference), records every call and can be told
//! to fail selected operations.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Backend, BackendError};
use crate::models::expense::parse_wire_date;
use crate::models::{
    Category, CategoryId, Expense, ExpenseId, Installment, NewCategory, NewExpense,
};

/// Kinds of backend calls, used for call recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    ListCategories,
    CreateCategory,
    DeleteCategory,
    ListExpenses,
    CreateExpense,
    DeleteExpense,
}

#[derive(Debug, Clone)]
struct StoredExpense {
    id: ExpenseId,
    description: String,
    amount: String,
    date: chrono::NaiveDate,
    category_id: CategoryId,
    installment: Installment,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    categories: Vec<Category>,
    expenses: Vec<StoredExpense>,
    calls: Vec<CallKind>,
    failing: HashSet<CallKind>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve(&self, stored: &StoredExpense) -> Expense {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == stored.category_id)
            .cloned();
        Expense {
            id: stored.id,
            description: stored.description.clone(),
            amount: stored.amount.clone(),
            date: stored.date,
            category,
            installment: stored.installment,
        }
    }
}

/// Backend that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a category directly, bypassing call recording
    pub fn seed_category(&self, name: &str) -> Category {
        let mut state = self.lock_unrecorded();
        let category = Category::new(CategoryId::new(state.next_id()), name);
        state.categories.push(category.clone());
        category
    }

    /// Seed an expense directly, bypassing call recording
    pub fn seed_expense(&self, body: &NewExpense) -> Expense {
        let mut state = self.lock_unrecorded();
        let id = ExpenseId::new(state.next_id());
        let stored = StoredExpense {
            id,
            description: body.description.clone(),
            amount: body.amount.clone(),
            date: parse_wire_date(&body.date).unwrap_or(chrono::NaiveDate::MIN),
            category_id: body.category_id,
            installment: body.installment,
        };
        let expense = state.resolve(&stored);
        state.expenses.push(stored);
        expense
    }

    /// Make every future call of `kind` fail with a 500
    pub fn fail(&self, kind: CallKind) {
        self.lock_unrecorded().failing.insert(kind);
    }

    /// Stop failing calls of `kind`
    pub fn recover(&self, kind: CallKind) {
        self.lock_unrecorded().failing.remove(&kind);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<CallKind> {
        self.lock_unrecorded().calls.clone()
    }

    /// Number of calls of `kind` made so far
    pub fn call_count(&self, kind: CallKind) -> usize {
        self.lock_unrecorded()
            .calls
            .iter()
            .filter(|&&c| c == kind)
            .count()
    }

    fn lock_unrecorded(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, kind: CallKind) -> Result<MutexGuard<'_, MemoryState>, BackendError> {
        let mut state = self.lock_unrecorded();
        state.calls.push(kind);
        if state.failing.contains(&kind) {
            return Err(BackendError::Status {
                status: 500,
                body: format!("{kind:?} unavailable"),
            });
        }
        Ok(state)
    }
}

fn not_found(what: &str, id: impl std::fmt::Display) -> BackendError {
    BackendError::Status {
        status: 404,
        body: format!("{what} {id} not found"),
    }
}

fn bad_request(message: impl Into<String>) -> BackendError {
    BackendError::Status {
        status: 400,
        body: message.into(),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        let state = self.begin(CallKind::ListCategories)?;
        Ok(state.categories.clone())
    }

    async fn create_category(
        &self,
        body: &NewCategory,
    ) -> Result<Option<Category>, BackendError> {
        let mut state = self.begin(CallKind::CreateCategory)?;
        let category = Category::new(CategoryId::new(state.next_id()), body.name.clone());
        state.categories.push(category.clone());
        Ok(Some(category))
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), BackendError> {
        let mut state = self.begin(CallKind::DeleteCategory)?;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Err(not_found("categoria", id));
        }
        Ok(())
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, BackendError> {
        let state = self.begin(CallKind::ListExpenses)?;
        Ok(state.expenses.iter().map(|e| state.resolve(e)).collect())
    }

    async fn create_expense(&self, body: &NewExpense) -> Result<Option<Expense>, BackendError> {
        let mut state = self.begin(CallKind::CreateExpense)?;
        if !state.categories.iter().any(|c| c.id == body.category_id) {
            return Err(bad_request(format!("unknown categoriaId {}", body.category_id)));
        }
        let date = parse_wire_date(&body.date)
            .ok_or_else(|| bad_request(format!("invalid fecha {:?}", body.date)))?;
        let stored = StoredExpense {
            id: ExpenseId::new(state.next_id()),
            description: body.description.clone(),
            amount: body.amount.clone(),
            date,
            category_id: body.category_id,
            installment: body.installment,
        };
        let expense = state.resolve(&stored);
        state.expenses.push(stored);
        Ok(Some(expense))
    }

    async fn delete_expense(&self, id: ExpenseId) -> Result<(), BackendError> {
        let mut state = self.begin(CallKind::DeleteExpense)?;
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        if state.expenses.len() == before {
            return Err(not_found("gasto", id));
        }
        Ok(())
    }
}

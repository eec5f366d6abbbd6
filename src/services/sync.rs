//! Mutate-then-refresh synchronization
//!
//! Every mutation the backend accepts is followed by a full re-fetch of the
//! same collection. The two steps are reported separately: a failed refresh
//! does not undo or hide a mutation that already happened server-side.
//!
//! [`SyncController`] owns both stores and performs the initial load.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use super::category::CategoryStore;
use super::expense::ExpenseStore;
use crate::audit::{AuditEntry, AuditLogger};
use crate::backend::Backend;
use crate::error::{GastosError, GastosResult};

/// Result of a mutation that the backend accepted
#[derive(Debug)]
pub struct Synced<T> {
    /// What the mutation produced
    pub value: T,

    /// Set when the follow-up refresh failed; the store may show stale data
    pub refresh_error: Option<GastosError>,
}

impl<T> Synced<T> {
    /// Check if the store now mirrors a fresh backend snapshot
    pub fn is_fresh(&self) -> bool {
        self.refresh_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Run `mutation`; if it succeeds, run `refresh` and attach its outcome.
pub(crate) async fn mutate_then_refresh<T, R, M, F, Fut>(
    mutation: M,
    refresh: F,
) -> GastosResult<Synced<T>>
where
    M: Future<Output = GastosResult<T>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = GastosResult<R>>,
{
    let value = mutation.await?;
    let refresh_error = refresh().await.err();
    if let Some(err) = &refresh_error {
        warn!(error = %err, "refresh after mutation failed");
    }
    Ok(Synced {
        value,
        refresh_error,
    })
}

/// Store state that counts requests in flight
pub(crate) trait Tracked {
    fn in_flight(&mut self) -> &mut usize;
}

/// Marks a request in flight for as long as it lives
pub(crate) struct InFlight<'a, S: Tracked> {
    state: &'a watch::Sender<S>,
}

impl<'a, S: Tracked> InFlight<'a, S> {
    pub(crate) fn new(state: &'a watch::Sender<S>) -> Self {
        state.send_modify(|s| *s.in_flight() += 1);
        Self { state }
    }
}

impl<S: Tracked> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(|s| {
            let count = s.in_flight();
            *count = count.saturating_sub(1);
        });
    }
}

/// Append to the audit log if one is configured. Never fails the caller.
pub(crate) fn record_audit(audit: Option<&AuditLogger>, entry: AuditEntry) {
    if let Some(logger) = audit {
        if let Err(err) = logger.log(&entry) {
            warn!(error = %err, path = %logger.path().display(), "failed to write audit entry");
        }
    }
}

/// Audit id for a created entity whose echo may be missing
pub(crate) fn audit_id(id: Option<impl std::fmt::Display>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Outcome of loading both collections
#[derive(Debug)]
pub struct LoadReport {
    /// Number of categories loaded, or why loading failed
    pub categories: GastosResult<usize>,
    /// Number of expenses loaded, or why loading failed
    pub expenses: GastosResult<usize>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.categories.is_ok() && self.expenses.is_ok()
    }
}

/// Owns the category and expense stores over one shared backend
pub struct SyncController<B> {
    categories: CategoryStore<B>,
    expenses: ExpenseStore<B>,
}

impl<B: Backend> SyncController<B> {
    /// Create a controller with empty stores
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            categories: CategoryStore::new(Arc::clone(&backend)),
            expenses: ExpenseStore::new(backend),
        }
    }

    /// Record confirmed mutations of both stores in `logger`
    pub fn with_audit(self, logger: AuditLogger) -> Self {
        Self {
            categories: self.categories.with_audit(logger.clone()),
            expenses: self.expenses.with_audit(logger),
        }
    }

    pub fn categories(&self) -> &CategoryStore<B> {
        &self.categories
    }

    pub fn expenses(&self) -> &ExpenseStore<B> {
        &self.expenses
    }

    /// Fetch both collections concurrently. Each store keeps its own error.
    pub async fn load_all(&self) -> LoadReport {
        let (categories, expenses) = tokio::join!(self.categories.list(), self.expenses.list());
        LoadReport {
            categories: categories.map(|c| c.len()),
            expenses: expenses.map(|e| e.len()),
        }
    }
}

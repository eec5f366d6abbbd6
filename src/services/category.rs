//! Category store
//!
//! Holds the known set of categories and the transient "new category" input.
//! Creating and deleting go through the backend and are followed by a full
//! refresh; deleting requires an explicit confirmation first.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::sync::{self, InFlight, Synced, Tracked};
use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backend::{Backend, BackendError};
use crate::error::{GastosError, GastosResult};
use crate::models::{Category, CategoryId, NewCategory};

const LOAD_FAILED: &str = "Failed to load categories";
const CREATE_FAILED: &str = "Failed to create category";
const DELETE_FAILED: &str = "Failed to delete category";

/// Snapshot of everything the category views render from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryState {
    /// Categories as of the last successful fetch
    pub categories: Vec<Category>,
    /// Transient input for the next category name
    pub draft_name: String,
    /// Short message for the last failed backend call, if not yet superseded
    pub error: Option<String>,
    /// Requests currently in flight
    pub in_flight: usize,
}

impl CategoryState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Look up a category in the current snapshot
    pub fn find(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Tracked for CategoryState {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> GastosResult<bool>;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> GastosResult<bool> {
        Ok(self(prompt))
    }
}

/// Confirmation given up front (e.g. `--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> GastosResult<bool> {
        Ok(true)
    }
}

/// Outcome of a delete that needed confirmation
#[derive(Debug)]
pub enum Deletion<Id> {
    /// The user declined; nothing was sent
    Declined,
    /// The backend deleted the entity
    Deleted(Synced<Id>),
}

/// State container for categories
pub struct CategoryStore<B> {
    backend: Arc<B>,
    state: watch::Sender<CategoryState>,
    audit: Option<AuditLogger>,
}

impl<B: Backend> CategoryStore<B> {
    /// Create an empty store
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: watch::Sender::new(CategoryState::default()),
            audit: None,
        }
    }

    /// Record confirmed mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Receive a notification whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<CategoryState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> CategoryState {
        self.state.borrow().clone()
    }

    /// Categories as of the last successful fetch
    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    /// Current error message, if any
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replace the transient "new category" input
    pub fn set_draft(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|s| s.draft_name = name);
    }

    /// Fetch all categories and replace the collection.
    ///
    /// On failure the previous collection is kept.
    pub async fn list(&self) -> GastosResult<Vec<Category>> {
        let _busy = InFlight::new(&self.state);
        match self.backend.list_categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "categories loaded");
                self.state.send_modify(|s| {
                    s.categories = categories.clone();
                    s.error = None;
                });
                Ok(categories)
            }
            Err(err) => Err(self.record_failure(LOAD_FAILED, err)),
        }
    }

    /// Create a category, then refresh.
    ///
    /// Whitespace-only names are rejected without contacting the backend.
    /// The value is the backend's echo of the new category, when it sent one.
    pub async fn create(&self, name: &str) -> GastosResult<Synced<Option<Category>>> {
        let body = NewCategory::parse(name).map_err(|e| GastosError::Validation(e.to_string()))?;
        sync::mutate_then_refresh(self.submit_create(&body), || self.list()).await
    }

    /// Create a category from the draft input
    pub async fn submit_draft(&self) -> GastosResult<Synced<Option<Category>>> {
        let name = self.state.borrow().draft_name.clone();
        self.create(&name).await
    }

    /// Delete a category after confirmation, then refresh.
    ///
    /// Expenses that reference the category are left alone.
    pub async fn delete(
        &self,
        id: CategoryId,
        confirm: &dyn Confirm,
    ) -> GastosResult<Deletion<CategoryId>> {
        let name = self.state.borrow().find(id).map(|c| c.name.clone());
        let prompt = match &name {
            Some(name) => format!("Delete category '{name}'? Expenses using it are kept."),
            None => format!("Delete category {id}? Expenses using it are kept."),
        };

        if !confirm.confirm(&prompt)? {
            debug!(%id, "category delete declined");
            return Ok(Deletion::Declined);
        }

        let synced =
            sync::mutate_then_refresh(self.submit_delete(id, name), || self.list()).await?;
        Ok(Deletion::Deleted(synced))
    }

    async fn submit_create(&self, body: &NewCategory) -> GastosResult<Option<Category>> {
        let _busy = InFlight::new(&self.state);
        match self.backend.create_category(body).await {
            Ok(created) => {
                let id = created.as_ref().map(|c| c.id);
                info!(id = ?id, name = %body.name, "category created");
                self.state.send_modify(|s| {
                    s.draft_name.clear();
                    s.error = None;
                });
                sync::record_audit(
                    self.audit.as_ref(),
                    AuditEntry::create(
                        EntityType::Category,
                        sync::audit_id(id),
                        Some(body.name.clone()),
                        body,
                    ),
                );
                Ok(created)
            }
            Err(err) => Err(self.record_failure(CREATE_FAILED, err)),
        }
    }

    async fn submit_delete(&self, id: CategoryId, name: Option<String>) -> GastosResult<CategoryId> {
        let _busy = InFlight::new(&self.state);
        match self.backend.delete_category(id).await {
            Ok(()) => {
                info!(%id, "category deleted");
                self.state.send_modify(|s| s.error = None);
                sync::record_audit(
                    self.audit.as_ref(),
                    AuditEntry::delete(EntityType::Category, id.to_string(), name),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CallKind, MemoryBackend};
    use tempfile::TempDir;

    fn store() -> (Arc<MemoryBackend>, CategoryStore<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let store = CategoryStore::new(Arc::clone(&backend));
        (backend, store)
    }

    #[tokio::test]
    async fn test_list_replaces_collection() {
        let (backend, store) = store();
        backend.seed_category("Comida");
        backend.seed_category("Transporte");

        let categories = store.list().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(store.categories(), categories);
        assert!(!store.snapshot().is_loading());
    }

    #[tokio::test]
    async fn test_failed_list_keeps_previous_collection() {
        let (backend, store) = store();
        backend.seed_category("Comida");
        store.list().await.unwrap();

        backend.fail(CallKind::ListCategories);
        let err = store.list().await.unwrap_err();

        assert!(err.is_fetch());
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.error().as_deref(), Some(LOAD_FAILED));
        assert!(!store.snapshot().is_loading());
    }

    #[tokio::test]
    async fn test_create_refreshes_and_clears_draft() {
        let (backend, store) = store();
        store.set_draft("Ocio");

        let synced = store.submit_draft().await.unwrap();

        assert!(synced.is_fresh());
        let created = synced.into_value().unwrap();
        assert_eq!(created.name, "Ocio");
        let matching = store
            .categories()
            .into_iter()
            .filter(|c| c.id == created.id)
            .count();
        assert_eq!(matching, 1);
        assert_eq!(store.snapshot().draft_name, "");
        assert_eq!(
            backend.calls(),
            vec![CallKind::CreateCategory, CallKind::ListCategories]
        );
    }

    #[tokio::test]
    async fn test_blank_name_never_reaches_backend() {
        let (backend, store) = store();
        store.set_draft("   ");

        let err = store.submit_draft().await.unwrap_err();

        assert!(err.is_validation());
        assert!(backend.calls().is_empty());
        assert_eq!(store.snapshot().draft_name, "   ");
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_create_keeps_state() {
        let (backend, store) = store();
        backend.fail(CallKind::CreateCategory);
        store.set_draft("Ocio");

        let err = store.submit_draft().await.unwrap_err();

        assert!(err.is_fetch());
        assert_eq!(store.snapshot().draft_name, "Ocio");
        assert_eq!(store.error().as_deref(), Some(CREATE_FAILED));
        assert_eq!(backend.call_count(CallKind::ListCategories), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_does_not_undo_create() {
        let (backend, store) = store();
        backend.fail(CallKind::ListCategories);

        let synced = store.create("Salud").await.unwrap();

        assert!(!synced.is_fresh());
        assert_eq!(store.error().as_deref(), Some(LOAD_FAILED));
        assert!(store.categories().is_empty());

        backend.recover(CallKind::ListCategories);
        store.list().await.unwrap();
        assert_eq!(store.categories().len(), 1);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let (backend, store) = store();
        let food = backend.seed_category("Comida");
        store.list().await.unwrap();

        let outcome = store.delete(food.id, &|_: &str| false).await.unwrap();

        assert!(matches!(outcome, Deletion::Declined));
        assert_eq!(backend.call_count(CallKind::DeleteCategory), 0);
        assert_eq!(store.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes() {
        let (backend, store) = store();
        let food = backend.seed_category("Comida");
        store.list().await.unwrap();

        let prompt = std::cell::RefCell::new(String::new());
        let outcome = store
            .delete(food.id, &|p: &str| {
                *prompt.borrow_mut() = p.to_string();
                true
            })
            .await
            .unwrap();

        assert!(matches!(outcome, Deletion::Deleted(ref s) if s.is_fresh()));
        assert!(prompt.borrow().contains("Comida"));
        assert!(store.categories().is_empty());
    }

    #[tokio::test]
    async fn test_delete_prompt_falls_back_to_id() {
        let (backend, store) = store();
        let food = backend.seed_category("Comida");

        let prompt = std::cell::RefCell::new(String::new());
        store
            .delete(food.id, &|p: &str| {
                *prompt.borrow_mut() = p.to_string();
                true
            })
            .await
            .unwrap();

        assert!(prompt.borrow().starts_with(&format!("Delete category {}?", food.id)));
        assert_eq!(backend.call_count(CallKind::DeleteCategory), 1);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let (backend, store) = store();
        backend.fail(CallKind::DeleteCategory);
        let food = backend.seed_category("Comida");
        assert!(store.delete(food.id, &AssumeYes).await.is_err());
        assert_eq!(store.error().as_deref(), Some(DELETE_FAILED));

        backend.recover(CallKind::DeleteCategory);
        store.delete(food.id, &AssumeYes).await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (backend, store) = store();
        backend.seed_category("Comida");
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.list().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().categories.len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let backend = Arc::new(MemoryBackend::new());
        let store = CategoryStore::new(Arc::clone(&backend)).with_audit(logger.clone());

        let created = store.create("Viajes").await.unwrap().into_value().unwrap();
        store.delete(created.id, &AssumeYes).await.unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_name.as_deref(), Some("Viajes"));
        assert_eq!(entries[1].entity_id, created.id.to_string());
    }
}

//! Reqwest-backed backend adapter.
//!
//! Owns transport details only: URL building, JSON encoding and decoding, and
//! mapping HTTP failures into [`BackendError`]. No timeout is configured and
//! nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{Backend, BackendError};
use crate::models::{Category, CategoryId, Expense, ExpenseId, NewCategory, NewExpense};

const CATEGORIES_PATH: &str = "categorias";
const EXPENSES_PATH: &str = "gastos";
const BODY_PREVIEW_LIMIT: usize = 200;

/// Backend adapter that talks to the REST API at one base URL
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build an adapter for `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be parsed or the client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Self::with_client(base_url, client)
    }

    /// Build an adapter around an already configured client
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, BackendError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// The normalized base URL (always ends in `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(ensure_success(response).await?).await
    }

    /// POST a new entity. Any 2xx status means the backend stored it, so a
    /// body that cannot be read or decoded only loses the echo.
    async fn post_created<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, BackendError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response).await?;

        match response.bytes().await {
            Ok(bytes) => Ok(decode_created(path, &bytes)),
            Err(err) => {
                warn!(path, error = %err, "could not read create response");
                Ok(None)
            }
        }
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        let url = self.endpoint(path)?;
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.get_json(CATEGORIES_PATH).await
    }

    async fn create_category(
        &self,
        body: &NewCategory,
    ) -> Result<Option<Category>, BackendError> {
        self.post_created(CATEGORIES_PATH, body).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), BackendError> {
        self.delete(&format!("{CATEGORIES_PATH}/{id}")).await
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, BackendError> {
        self.get_json(EXPENSES_PATH).await
    }

    async fn create_expense(&self, body: &NewExpense) -> Result<Option<Expense>, BackendError> {
        self.post_created(EXPENSES_PATH, body).await
    }

    async fn delete_expense(&self, id: ExpenseId) -> Result<(), BackendError> {
        self.delete(&format!("{EXPENSES_PATH}/{id}")).await
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins append
/// instead of replacing the last path segment.
pub fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| BackendError::Transport(format!("invalid base URL {trimmed:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BackendError::Transport(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }
    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body: body_preview(&body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

fn decode_created<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Option<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!(path, "create response has no body");
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(created) => Some(created),
        Err(err) => {
            warn!(path, error = %err, "create response not decodable");
            None
        }
    }
}

fn transport(error: reqwest::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

fn body_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

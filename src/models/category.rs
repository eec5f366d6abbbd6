//! Category model
//!
//! Categories are user-defined labels that group expenses. They are created
//! and deleted through the backend and never edited in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// A category as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend-assigned identifier
    pub id: CategoryId,

    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Category {
    /// Create a category value (normally only the backend does this)
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Request body for creating a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl NewCategory {
    /// Build a request from a raw name.
    ///
    /// The name is sent as typed; only whitespace-only names are rejected.
    pub fn parse(name: &str) -> Result<Self, CategoryValidationError> {
        if name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

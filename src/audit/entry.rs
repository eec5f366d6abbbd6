//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Category,
    Expense,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Category => write!(f, "Category"),
            EntityType::Expense => write!(f, "Expense"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the backend confirmed the operation (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Backend id of the affected entity
    pub entity_id: String,

    /// Category name or expense description, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Request body that was sent, for creates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a confirmed create, keeping the request body that was sent
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        payload: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            payload: serde_json::to_value(payload).ok(),
        }
    }

    /// Entry for a confirmed delete
    pub fn delete(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            payload: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry_keeps_payload() {
        let entry = AuditEntry::create(
            EntityType::Category,
            "4",
            Some("Comida".to_string()),
            &json!({"nombre": "Comida"}),
        );
        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.payload, Some(json!({"nombre": "Comida"})));
    }

    #[test]
    fn test_delete_entry_serialization_skips_empty_fields() {
        let entry = AuditEntry::delete(EntityType::Expense, "12", None);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["operation"], "delete");
        assert_eq!(json["entity_type"], "expense");
        assert!(json.get("entity_name").is_none());
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete(EntityType::Category, "7", Some("Ocio".to_string()));
        let text = entry.format_human_readable();
        assert!(text.contains("DELETE Category 7 (Ocio)"));
        assert!(text.ends_with("(Ocio)"));
    }
}

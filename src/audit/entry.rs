//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Account or budget category was locked
    Lock,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Lock => write!(f, "LOCK"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Account,
    Budget,
    Transaction,
    User,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Budget => write!(f, "Budget"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::User => write!(f, "User"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Human-readable description of the entity (e.g. user name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Snapshot before the operation (updates and locks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Snapshot after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary, or the lock reason for locks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Create a new audit entry for a lock
    pub fn lock<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Lock,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: Some(reason.into()),
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

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Operation::Lock.to_string(), "LOCK");
        assert_eq!(EntityType::Budget.to_string(), "Budget");
    }

    #[test]
    fn test_update_entry_keeps_both_snapshots() {
        let before = json!({"balance": "100"});
        let after = json!({"balance": "60"});

        let entry = AuditEntry::update(
            EntityType::Account,
            "123-456",
            Some("Sam".to_string()),
            &before,
            &after,
            Some("balance: \"100\" -> \"60\"".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before, Some(before));
        assert_eq!(entry.after, Some(after));
    }

    #[test]
    fn test_lock_entry_carries_reason() {
        let entry = AuditEntry::lock(
            EntityType::Budget,
            "123-456/eating-out",
            Some("Sam".to_string()),
            &json!({"limit": "50"}),
            "Locked: You have exceeded your budget limit.",
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("LOCK Budget 123-456/eating-out (Sam)"));
        assert!(formatted.contains("Locked: You have exceeded your budget limit."));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(EntityType::User, "usr-1", None, &json!({"name": "Sam"}));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"create\""));
        assert!(!json.contains("before"));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.entity_type, EntityType::User);
    }
}

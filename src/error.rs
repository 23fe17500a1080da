//! Custom error types for FAM
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{AccountId, BudgetCategory, Money};

/// The main error type for FAM operations
#[derive(Error, Debug)]
pub enum FamError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input; nothing was changed and the action can be retried
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Insufficient funds in the bank account
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// Stored state contradicts what registration guarantees
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FamError {
    /// Create a "not found" error for bank accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// A registered account is missing one of its category budgets
    pub fn budget_missing(account_id: &AccountId, category: BudgetCategory) -> Self {
        Self::InvariantViolation(format!(
            "no {} budget exists for registered account {}",
            category, account_id
        ))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a user-input error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InsufficientFunds { .. } | Self::Duplicate { .. }
        )
    }

    /// Check if this error signals corrupted or inconsistent state
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

impl From<std::io::Error> for FamError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for FAM operations
pub type FamResult<T> = Result<T, FamError>;

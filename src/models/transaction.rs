//! Transaction model
//!
//! An immutable record of one spending event against a budget category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Longest merchant name we keep
pub const MAX_MERCHANT_LEN: usize = 100;

/// A recorded spending event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account that paid
    pub account_id: AccountId,

    /// Budget category the spend counts against
    pub category: BudgetCategory,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Where the money was spent
    #[serde(default)]
    pub merchant: String,

    /// When the transaction was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        account_id: AccountId,
        category: BudgetCategory,
        amount: Money,
        merchant: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            category,
            amount,
            merchant: merchant.into().trim().to_string(),
            timestamp,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.merchant.len() > MAX_MERCHANT_LEN {
            return Err(TransactionValidationError::MerchantTooLong(
                self.merchant.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.amount,
            if self.merchant.is_empty() {
                "(no merchant)"
            } else {
                self.merchant.as_str()
            },
            self.category
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    MerchantTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive, non-zero number (got {})", amount)
            }
            Self::MerchantTooLong(len) => write!(
                f,
                "Merchant name too long ({} chars, max {})",
                len, MAX_MERCHANT_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

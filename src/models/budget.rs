//! Budget model
//!
//! One budget exists per (account, category) pair. Spending is accumulated as
//! a negative number so that `limit + spent` is the amount still available.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::ids::AccountId;
use super::money::Money;

/// A spending limit for one category of one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// The account this budget belongs to
    pub account_id: AccountId,

    /// The category this budget covers
    pub category: BudgetCategory,

    /// Maximum intended spend
    pub limit: Money,

    /// Negative magnitude of everything spent so far (zero or below)
    pub spent: Money,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with nothing spent
    pub fn new(account_id: AccountId, category: BudgetCategory, limit: Money) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            category,
            limit,
            spent: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record spending against this budget
    ///
    /// Leaves the budget untouched if the accumulator would overflow.
    pub fn add_spent(&mut self, amount: Money) -> Result<(), BudgetValidationError> {
        self.spent = self
            .spent
            .checked_sub(amount)
            .ok_or(BudgetValidationError::SpentOverflow(amount))?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the limit has been used up
    pub fn is_exceeded(&self) -> bool {
        !(self.limit + self.spent).is_positive()
    }

    /// Amount left before the limit is reached (negative once over)
    pub fn remaining(&self) -> Money {
        self.limit + self.spent
    }

    /// Total spent, as a positive amount
    pub fn total_spent(&self) -> Money {
        -self.spent
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }

        if self.limit > Money::MAX {
            return Err(BudgetValidationError::LimitTooLarge(self.limit));
        }

        if self.spent.is_positive() {
            return Err(BudgetValidationError::PositiveSpent(self.spent));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: spent {} of {}",
            self.category,
            self.total_spent(),
            self.limit
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
    PositiveSpent(Money),
    LimitTooLarge(Money),
    SpentOverflow(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be greater than zero (got {})", limit)
            }
            Self::PositiveSpent(spent) => {
                write!(f, "Spent accumulator cannot be positive (got {})", spent)
            }
            Self::LimitTooLarge(limit) => {
                write!(f, "Budget limit cannot exceed {} (got {})", Money::MAX, limit)
            }
            Self::SpentOverflow(amount) => {
                write!(f, "Spending {} would overflow the budget", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

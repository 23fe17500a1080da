//! Bank account model
//!
//! Represents the bank account a child spends from, and the rules under which
//! the account locks itself.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;
use super::transaction::Transaction;

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// No restriction beyond the balance
    #[default]
    Chequing,
    /// Limited number of transactions per trailing window
    Saving,
}

impl AccountKind {
    /// Parse account kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "chequing" | "checking" => Some(Self::Chequing),
            "2" | "saving" | "savings" => Some(Self::Saving),
            _ => None,
        }
    }

    /// Whether this kind of account has exceeded its own transaction limit
    ///
    /// `recent_transactions` is the number of the account's transactions that
    /// fall inside `limit.window` as of now.
    pub fn is_over_limit(&self, recent_transactions: usize, limit: &FrequencyLimit) -> bool {
        match self {
            Self::Chequing => false,
            Self::Saving => recent_transactions >= limit.max_transactions,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chequing => write!(f, "Chequing"),
            Self::Saving => write!(f, "Saving"),
        }
    }
}

/// Transaction frequency cap applied to Saving accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyLimit {
    pub max_transactions: usize,
    pub window: Duration,
}

impl Default for FrequencyLimit {
    fn default() -> Self {
        Self {
            max_transactions: 2,
            window: Duration::days(30),
        }
    }
}

/// Count the account's transactions timestamped inside the trailing window
///
/// The window is anchored at `now`, so the count can drop between calls as
/// older transactions age out.
pub fn recent_transaction_count(
    account_id: &AccountId,
    transactions: &[Transaction],
    now: DateTime<Utc>,
    window: Duration,
) -> usize {
    let cutoff = now - window;
    transactions
        .iter()
        .filter(|t| &t.account_id == account_id && t.timestamp > cutoff)
        .count()
}

/// Why an account was locked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    /// The user's archetype locks the whole account once enough categories lock
    CategoryLockout,
    /// Saving account hit its transaction frequency cap
    TransactionFrequency,
    /// Balance reached zero or below
    NonPositiveBalance,
}

impl fmt::Display for LockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryLockout => write!(f, "too many budget categories locked"),
            Self::TransactionFrequency => write!(f, "saving account transaction limit reached"),
            Self::NonPositiveBalance => write!(f, "bank balance reached zero"),
        }
    }
}

/// A child's bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Bank account number
    pub id: AccountId,

    /// Name of the bank holding the account
    pub bank_name: String,

    /// Kind of account
    pub kind: AccountKind,

    /// Current balance
    pub balance: Money,

    /// Whether the account is frozen
    pub locked: bool,

    /// First rule that locked the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<LockReason>,

    /// Transactions inside the frequency window as of the last recording
    #[serde(default)]
    pub recent_transaction_count: usize,

    /// When the account was registered
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Create a new, unlocked account
    pub fn new(
        id: AccountId,
        bank_name: impl Into<String>,
        kind: AccountKind,
        opening_balance: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            bank_name: bank_name.into(),
            kind,
            balance: opening_balance,
            locked: false,
            lock_reason: None,
            recent_transaction_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Take money out of the account
    pub fn debit(&mut self, amount: Money) {
        self.balance -= amount;
        self.updated_at = Utc::now();
    }

    /// Lock the account. The first reason is kept; locks are never lifted.
    pub fn lock(&mut self, reason: LockReason) {
        if !self.locked {
            self.locked = true;
            self.lock_reason = Some(reason);
            self.updated_at = Utc::now();
        }
    }

    /// Balance at or below zero
    pub fn is_balance_non_positive(&self) -> bool {
        !self.balance.is_positive()
    }

    /// Balance still positive but under `threshold`
    pub fn is_low_balance(&self, threshold: Money) -> bool {
        self.balance.is_positive() && self.balance < threshold
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.id.is_empty() {
            return Err(AccountValidationError::EmptyNumber);
        }

        if self.bank_name.trim().is_empty() {
            return Err(AccountValidationError::EmptyBankName);
        }

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        if self.balance > Money::MAX {
            return Err(AccountValidationError::BalanceTooLarge(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.bank_name, self.id, self.kind)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyNumber,
    EmptyBankName,
    NegativeBalance(Money),
    BalanceTooLarge(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "Bank account number cannot be empty"),
            Self::EmptyBankName => write!(f, "Bank name cannot be empty"),
            Self::NegativeBalance(balance) => {
                write!(f, "Opening balance cannot be negative ({})", balance)
            }
            Self::BalanceTooLarge(balance) => {
                write!(f, "Opening balance cannot exceed {} ({})", Money::MAX, balance)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

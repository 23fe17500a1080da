//! Core data models for FAM
//!
//! This module contains all the data structures that represent the allowance
//! domain: users, bank accounts, category budgets and transactions.

pub mod account;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;

pub use account::{
    recent_transaction_count, AccountKind, BankAccount, FrequencyLimit, LockReason,
};
pub use budget::Budget;
pub use category::BudgetCategory;
pub use ids::{AccountId, TransactionId, UserId};
pub use money::Money;
pub use transaction::Transaction;
pub use user::{Archetype, User};

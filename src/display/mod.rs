//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and recording notices.

pub mod account;
pub mod budget;
pub mod record;
pub mod transaction;
pub mod user;

pub use account::{format_account_details, format_account_header};
pub use budget::format_budget_table;
pub use record::{format_abort, format_receipt, format_record_outcome};
pub use transaction::{format_category_history, format_transaction_register};
pub use user::{format_registration, format_user_list};

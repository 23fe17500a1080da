//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod budget;
pub mod record;
pub mod register;
pub mod transaction;
pub mod user;

pub use account::{handle_account_command, AccountCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetArgs};
pub use record::{handle_record_command, RecordArgs};
pub use register::{handle_register_command, RegisterArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use user::{handle_user_command, UserCommands};

use crate::error::{FamError, FamResult};
use crate::models::money::MoneyParseError;
use crate::models::{BudgetCategory, Money};

/// Parse a money argument, naming the field in the error
pub(crate) fn parse_money(input: &str, field: &str) -> FamResult<Money> {
    Money::parse(input).map_err(|e| match e {
        MoneyParseError::InvalidFormat(_) => FamError::Validation(format!(
            "Invalid {}: '{}'. Use a format like '12.50' or '$12.50'",
            field, input
        )),
        other => FamError::Validation(format!("Invalid {}: {}", field, other)),
    })
}

/// Parse a category by menu number, short key or name
pub(crate) fn parse_category(input: &str) -> FamResult<BudgetCategory> {
    BudgetCategory::parse(input).ok_or_else(|| {
        FamError::Validation(format!(
            "Invalid category: '{}'. Valid categories: 1/games, 2/clothing, 3/eating-out, 4/misc",
            input
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("$12.50", "amount").unwrap(), Money::from_cents(1250));
        let err = parse_money("twelve", "amount").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid amount"));

        let err = parse_money("0.001", "amount").unwrap_err();
        assert!(err.to_string().contains("more than two decimal places"));
        let err = parse_money("79228162514264337593543950335", "limit").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid limit: Amount is larger than"));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("3").unwrap(), BudgetCategory::EatingOut);
        assert_eq!(parse_category("misc").unwrap(), BudgetCategory::Miscellaneous);
        assert!(parse_category("travel").unwrap_err().is_validation());
    }
}

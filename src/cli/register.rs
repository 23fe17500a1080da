//! Register CLI command
//!
//! Creates a user together with their bank account and one budget per
//! category.

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::cli::parse_money;
use crate::config::settings::Settings;
use crate::display::format_registration;
use crate::error::{FamError, FamResult};
use crate::models::{AccountKind, Archetype, BudgetCategory};
use crate::services::{RegisterUser, RegistrationService};
use crate::storage::Storage;

/// Arguments for `fam register`
#[derive(Args)]
pub struct RegisterArgs {
    /// User name
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: String,
    /// User type (1/rebel, 2/angel, 3/troublemaker)
    #[arg(short = 't', long = "type")]
    pub archetype: String,
    /// Bank account number
    #[arg(short, long)]
    pub account: String,
    /// Bank name
    #[arg(short, long)]
    pub bank: String,
    /// Account type (chequing, saving)
    #[arg(short, long, default_value = "chequing")]
    pub kind: String,
    /// Opening balance
    #[arg(long, default_value = "0")]
    pub balance: String,
    /// Games & Entertainment limit
    #[arg(long)]
    pub games: String,
    /// Clothing & Accessories limit
    #[arg(long)]
    pub clothing: String,
    /// Eating Out limit
    #[arg(long)]
    pub eating_out: String,
    /// Miscellaneous limit
    #[arg(long)]
    pub misc: String,
}

impl RegisterArgs {
    fn into_input(self) -> FamResult<RegisterUser> {
        let date_of_birth = NaiveDate::parse_from_str(self.dob.trim(), "%Y-%m-%d").map_err(|_| {
            FamError::Validation(format!(
                "Invalid date of birth: '{}'. Use YYYY-MM-DD",
                self.dob
            ))
        })?;

        let archetype = Archetype::parse(&self.archetype).ok_or_else(|| {
            FamError::Validation(format!(
                "Invalid user type: '{}'. Valid types: 1/rebel, 2/angel, 3/troublemaker",
                self.archetype
            ))
        })?;

        let account_kind = AccountKind::parse(&self.kind).ok_or_else(|| {
            FamError::Validation(format!(
                "Invalid account type: '{}'. Valid types: chequing, saving",
                self.kind
            ))
        })?;

        let limits = vec![
            (
                BudgetCategory::GamesEntertainment,
                parse_money(&self.games, "games limit")?,
            ),
            (
                BudgetCategory::ClothingAccessories,
                parse_money(&self.clothing, "clothing limit")?,
            ),
            (
                BudgetCategory::EatingOut,
                parse_money(&self.eating_out, "eating out limit")?,
            ),
            (
                BudgetCategory::Miscellaneous,
                parse_money(&self.misc, "misc limit")?,
            ),
        ];

        Ok(RegisterUser {
            name: self.name,
            date_of_birth,
            archetype,
            account_number: self.account,
            bank_name: self.bank,
            account_kind,
            opening_balance: parse_money(&self.balance, "balance")?,
            limits,
        })
    }
}

/// Handle `fam register`
pub fn handle_register_command(
    storage: &Storage,
    settings: &Settings,
    args: RegisterArgs,
) -> FamResult<()> {
    let input = args.into_input()?;
    let today = Local::now().date_naive();

    let registration = RegistrationService::new(storage, settings).register(input, today)?;
    print!("{}", format_registration(&registration));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn args() -> RegisterArgs {
        RegisterArgs {
            name: "Sam".into(),
            dob: "2010-04-01".into(),
            archetype: "3".into(),
            account: "123-456".into(),
            bank: "Maple Bank".into(),
            kind: "saving".into(),
            balance: "100".into(),
            games: "40".into(),
            clothing: "30".into(),
            eating_out: "$50.00".into(),
            misc: "10".into(),
        }
    }

    #[test]
    fn test_into_input() {
        let input = args().into_input().unwrap();
        assert_eq!(input.archetype, Archetype::TroubleMaker);
        assert_eq!(input.account_kind, AccountKind::Saving);
        assert_eq!(input.opening_balance, Money::from_dollars(100));
        assert_eq!(
            input.limits[2],
            (BudgetCategory::EatingOut, Money::from_dollars(50))
        );
    }

    #[test]
    fn test_bad_date_is_validation_error() {
        let mut bad = args();
        bad.dob = "01/04/2010".into();
        assert!(bad.into_input().unwrap_err().is_validation());
    }

    #[test]
    fn test_bad_type_is_validation_error() {
        let mut bad = args();
        bad.archetype = "saint".into();
        let err = bad.into_input().unwrap_err();
        assert!(err.to_string().contains("Invalid user type"));
    }
}

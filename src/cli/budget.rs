//! Budget CLI command

use clap::Args;

use crate::display::format_budget_table;
use crate::error::FamResult;
use crate::services::{BudgetService, UserService};
use crate::storage::Storage;

/// Arguments for `fam budget`
#[derive(Args)]
pub struct BudgetArgs {
    /// User name or ID
    pub user: String,
}

/// Handle `fam budget`: per-category status for a user
pub fn handle_budget_command(storage: &Storage, args: BudgetArgs) -> FamResult<()> {
    let user = UserService::new(storage).require(&args.user)?;
    let statuses = BudgetService::new(storage).status_for_user(&user)?;

    println!("Budgets for {}", user);
    print!("{}", format_budget_table(&statuses));

    Ok(())
}

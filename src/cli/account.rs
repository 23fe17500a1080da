//! Account CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_account_details;
use crate::error::FamResult;
use crate::services::{AccountService, UserService};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Show a user's account, budgets and transactions
    Show {
        /// User name or ID
        user: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> FamResult<()> {
    match cmd {
        AccountCommands::Show { user } => {
            let user = UserService::new(storage).require(&user)?;
            let summary = AccountService::new(storage).summary(&user)?;
            print!(
                "{}",
                format_account_details(&user, &summary, &settings.date_format)
            );
        }
    }

    Ok(())
}

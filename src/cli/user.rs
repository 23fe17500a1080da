//! User CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::display::{format_account_header, format_user_list};
use crate::error::FamResult;
use crate::services::{AccountService, UserService};
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List registered users
    List,
    /// Show a user's profile
    Show {
        /// User name or ID
        user: String,
    },
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> FamResult<()> {
    let service = UserService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        UserCommands::List => {
            let users = service.list()?;
            print!("{}", format_user_list(&users, today));
        }

        UserCommands::Show { user } => {
            let user = service.require(&user)?;
            let account = AccountService::new(storage).get_for_user(&user)?;

            println!("User: {}", user.name);
            println!("  ID:             {}", user.id);
            println!("  Type:           {}", user.archetype);
            println!(
                "  Born:           {} (age {})",
                user.date_of_birth.format("%Y-%m-%d"),
                user.age_on(today)
            );
            println!(
                "  Warning at:     {}% of each budget",
                (user.warning_threshold * rust_decimal::Decimal::ONE_HUNDRED)
                    .trunc()
                    .normalize()
            );
            print!("{}", format_account_header(&account));
        }
    }

    Ok(())
}

//! Transaction CLI commands

use clap::Subcommand;

use crate::cli::parse_category;
use crate::config::settings::Settings;
use crate::display::format_transaction_register;
use crate::error::FamResult;
use crate::services::{TransactionFilter, TransactionService, UserService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List a user's transactions, oldest first
    List {
        /// User name or ID
        user: String,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Show only the most recent N
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FamResult<()> {
    match cmd {
        TransactionCommands::List {
            user,
            category,
            limit,
        } => {
            let user = UserService::new(storage).require(&user)?;

            let mut filter = TransactionFilter::new();
            if let Some(category) = category {
                filter = filter.category(parse_category(&category)?);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = TransactionService::new(storage).list_for_user(&user, filter)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &settings.date_format)
            );
        }
    }

    Ok(())
}

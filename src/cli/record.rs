//! Record CLI command

use clap::Args;

use crate::cli::{parse_category, parse_money};
use crate::config::settings::Settings;
use crate::display::format_record_outcome;
use crate::error::FamResult;
use crate::services::{RecordRequest, TransactionRecorder, UserService};
use crate::storage::Storage;

/// Arguments for `fam record`
#[derive(Args)]
pub struct RecordArgs {
    /// User name or ID
    pub user: String,
    /// Category (1-4, games, clothing, eating-out, misc)
    pub category: String,
    /// Amount spent (e.g. "12.50")
    pub amount: String,
    /// Where the money was spent
    #[arg(short, long, default_value = "")]
    pub merchant: String,
}

/// Handle `fam record`
///
/// An aborted recording is reported on stdout and is not an error.
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    args: RecordArgs,
) -> FamResult<()> {
    let user = UserService::new(storage).require(&args.user)?;
    let request = RecordRequest {
        category: parse_category(&args.category)?,
        amount: parse_money(&args.amount, "amount")?,
        merchant: args.merchant,
    };

    let outcome = TransactionRecorder::new(storage, settings).record(&user, request)?;
    print!("{}", format_record_outcome(&outcome, &settings.date_format));

    Ok(())
}

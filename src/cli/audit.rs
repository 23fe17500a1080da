//! Audit CLI command

use clap::Args;

use crate::error::FamResult;
use crate::storage::Storage;

/// Arguments for `fam audit`
#[derive(Args)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle `fam audit`: print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> FamResult<()> {
    let entries = storage.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

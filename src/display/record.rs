//! Formatting for the outcome of a recording attempt
//!
//! Notices are printed in the order they were raised. The category's
//! transaction history follows the last threshold notice, once.

use crate::display::transaction::format_category_history;
use crate::services::recorder::{Abort, Notice, Receipt, RecordOutcome};

/// Format a committed or aborted recording
pub fn format_record_outcome(outcome: &RecordOutcome, date_format: &str) -> String {
    match outcome {
        RecordOutcome::Committed(receipt) => format_receipt(receipt, date_format),
        RecordOutcome::Aborted(abort) => format_abort(abort),
    }
}

/// Format a committed transaction with its notices
pub fn format_receipt(receipt: &Receipt, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recorded: {}\n", receipt.transaction));
    output.push_str(&format!(
        "  {} remaining: {}\n",
        receipt.budget.category,
        receipt.budget.remaining()
    ));
    output.push_str(&format!("  Bank balance: {}\n", receipt.account.balance));

    let history_after = receipt.notices.iter().rposition(is_threshold_notice);
    for (i, notice) in receipt.notices.iter().enumerate() {
        output.push_str(&format!("{}\n", notice));
        if Some(i) == history_after {
            if let Some(history) = &receipt.category_history {
                output.push_str(&format_category_history(history, date_format));
            }
        }
    }

    output
}

/// Format an aborted recording: its notices, then the reason
pub fn format_abort(abort: &Abort) -> String {
    let mut output = String::new();
    for notice in &abort.notices {
        output.push_str(&format!("{}\n", notice));
    }
    output.push_str(&format!("{}\n", abort.reason));
    if abort.reason.is_retryable() {
        output.push_str("Nothing was recorded. Try again with a different amount.\n");
    }
    output
}

fn is_threshold_notice(notice: &Notice) -> bool {
    matches!(
        notice,
        Notice::Lockout(_) | Notice::BudgetExceeded { .. } | Notice::Warning(_)
    )
}

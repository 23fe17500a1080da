//! Account display formatting
//!
//! Formats the account details screen: bank account, category budgets and
//! full transaction history.

use crate::display::budget::format_budget_table;
use crate::display::transaction::format_transaction_register;
use crate::models::{BankAccount, User};
use crate::services::account::AccountSummary;

/// Format the bank account header block
pub fn format_account_header(account: &BankAccount) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.id));
    output.push_str(&format!("  Bank:           {}\n", account.bank_name));
    output.push_str(&format!("  Type:           {}\n", account.kind));
    output.push_str(&format!("  Balance:        {}\n", account.balance));

    let status = match (account.locked, account.lock_reason) {
        (true, Some(reason)) => format!("Locked ({})", reason),
        (true, None) => "Locked".to_string(),
        (false, _) => "Active".to_string(),
    };
    output.push_str(&format!("  Status:         {}\n", status));

    if account.recent_transaction_count > 0 {
        output.push_str(&format!(
            "  Recent txns:    {}\n",
            account.recent_transaction_count
        ));
    }

    output
}

/// Format a user's full account details
pub fn format_account_details(user: &User, summary: &AccountSummary, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user));
    output.push_str(&format_account_header(&summary.account));
    output.push('\n');

    output.push_str("Budgets:\n");
    output.push_str(&format_budget_table(&summary.budgets));
    output.push('\n');

    output.push_str(&format!("Transactions ({}):\n", summary.transactions.len()));
    output.push_str(&format_transaction_register(&summary.transactions, date_format));

    output
}

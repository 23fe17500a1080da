//! Transaction display formatting
//!
//! Register tables for a user's transactions and the per-category history
//! shown after a budget crosses a threshold.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Merchant")]
    merchant: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, date_format: &str) -> Self {
        let merchant = if txn.merchant.is_empty() {
            "(no merchant)".to_string()
        } else {
            truncate(&txn.merchant, 30)
        };

        Self {
            date: txn.timestamp.format(date_format).to_string(),
            category: txn.category.to_string(),
            merchant,
            amount: txn.amount.to_string(),
        }
    }
}

/// Format transactions as a register table, oldest first
pub fn format_transaction_register(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, date_format));
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// One line per transaction, as listed under a threshold notice
pub fn format_category_history(transactions: &[Transaction], date_format: &str) -> String {
    let mut output = String::new();
    for txn in transactions {
        let merchant = if txn.merchant.is_empty() {
            "(no merchant)"
        } else {
            txn.merchant.as_str()
        };
        output.push_str(&format!(
            "  {}  {:>10}  {}\n",
            txn.timestamp.format(date_format),
            txn.amount.to_string(),
            merchant
        ));
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

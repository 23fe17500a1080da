//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::budget::BudgetStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "#")]
    id: u8,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format category budgets as a table
pub fn format_budget_table(statuses: &[BudgetStatus]) -> String {
    if statuses.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = statuses.iter().map(|s| BudgetRow {
        id: s.category().id(),
        category: s.category().to_string(),
        limit: s.budget.limit.to_string(),
        spent: s.spent().to_string(),
        remaining: s.remaining().to_string(),
        status: s.state.to_string(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

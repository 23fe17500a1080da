//! User display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;
use crate::services::registration::Registration;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Type")]
    archetype: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format users as a table, with ages as of `today`
pub fn format_user_list(users: &[User], today: NaiveDate) -> String {
    if users.is_empty() {
        return "No users registered. Use 'fam register' to add one.\n".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        name: u.name.clone(),
        age: u.age_on(today),
        archetype: u.archetype.to_string(),
        account: u.account_id.to_string(),
        id: u.id.to_string(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Confirmation printed after a successful registration
pub fn format_registration(registration: &Registration) -> String {
    let user = &registration.user;
    let account = &registration.account;

    let mut output = String::new();
    output.push_str(&format!("Registered {} ({})\n", user.name, user.id));
    output.push_str(&format!(
        "  Account:  {} at {} ({})\n",
        account.id, account.bank_name, account.kind
    ));
    output.push_str(&format!("  Balance:  {}\n", account.balance));
    for budget in &registration.budgets {
        output.push_str(&format!("  {:<24}{}\n", budget.category.to_string(), budget.limit));
    }
    output
}

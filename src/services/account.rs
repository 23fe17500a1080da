//! Account service
//!
//! Bank account details for a user, together with their budgets and full
//! transaction history.

use crate::error::{FamError, FamResult};
use crate::models::{BankAccount, Transaction, User};
use crate::services::budget::{BudgetService, BudgetStatus};
use crate::storage::Storage;

/// Service for account queries
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// Everything shown on the account details screen
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: BankAccount,
    /// Ordered by category id
    pub budgets: Vec<BudgetStatus>,
    /// In recording order
    pub transactions: Vec<Transaction>,
}

impl AccountSummary {
    /// Number of categories currently refusing transactions
    pub fn locked_categories(&self) -> usize {
        self.budgets.iter().filter(|b| b.is_locked()).count()
    }
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The user's bank account
    pub fn get_for_user(&self, user: &User) -> FamResult<BankAccount> {
        self.storage
            .accounts
            .get(&user.account_id)?
            .ok_or_else(|| FamError::account_not_found(user.account_id.to_string()))
    }

    /// Account, budgets and transactions for a user
    pub fn summary(&self, user: &User) -> FamResult<AccountSummary> {
        let account = self.get_for_user(user)?;
        let budgets = BudgetService::new(self.storage).status_for_user(user)?;
        let transactions = self.storage.transactions.list_by_account(&account.id)?;

        Ok(AccountSummary {
            account,
            budgets,
            transactions,
        })
    }

    /// All registered accounts, ordered by number
    pub fn list(&self) -> FamResult<Vec<BankAccount>> {
        self.storage.accounts.get_all()
    }
}

//! Transaction service
//!
//! Read-side queries over the transaction log. Recording goes through
//! `TransactionRecorder`.

use crate::error::FamResult;
use crate::models::{BudgetCategory, Transaction, TransactionId, User};
use crate::storage::Storage;

/// Options for filtering a user's transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category
    pub category: Option<BudgetCategory>,
    /// Keep only the most recent N
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: BudgetCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for transaction queries
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self, id: TransactionId) -> FamResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// A user's transactions in recording order
    pub fn list_for_user(
        &self,
        user: &User,
        filter: TransactionFilter,
    ) -> FamResult<Vec<Transaction>> {
        let mut transactions = match filter.category {
            Some(category) => self
                .storage
                .transactions
                .list_by_account_and_category(&user.account_id, category)?,
            None => self.storage.transactions.list_by_account(&user.account_id)?,
        };

        if let Some(limit) = filter.limit {
            let start = transactions.len().saturating_sub(limit);
            transactions.drain(..start);
        }

        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FamPaths;
    use crate::models::{AccountId, Archetype, Money};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_list_for_user_with_filters() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FamPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = User::new(
            "Sam",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            AccountId::new("1"),
            Archetype::Rebel,
            dec!(0.5),
        );

        let categories = [
            BudgetCategory::EatingOut,
            BudgetCategory::Miscellaneous,
            BudgetCategory::EatingOut,
            BudgetCategory::EatingOut,
        ];
        for (i, category) in categories.into_iter().enumerate() {
            storage
                .transactions
                .append(Transaction::new(
                    AccountId::new("1"),
                    category,
                    Money::from_dollars(i as i64 + 1),
                    "Shop",
                    Utc::now(),
                ))
                .unwrap();
        }
        storage
            .transactions
            .append(Transaction::new(
                AccountId::new("2"),
                BudgetCategory::EatingOut,
                Money::from_dollars(99),
                "Elsewhere",
                Utc::now(),
            ))
            .unwrap();

        let service = TransactionService::new(&storage);
        assert_eq!(service.list_for_user(&user, TransactionFilter::new()).unwrap().len(), 4);

        let eating = service
            .list_for_user(&user, TransactionFilter::new().category(BudgetCategory::EatingOut))
            .unwrap();
        let amounts: Vec<_> = eating.iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_dollars(1), Money::from_dollars(3), Money::from_dollars(4)]
        );

        let last_two = service
            .list_for_user(
                &user,
                TransactionFilter::new()
                    .category(BudgetCategory::EatingOut)
                    .limit(2),
            )
            .unwrap();
        assert_eq!(last_two[0].amount, Money::from_dollars(3));
        assert_eq!(last_two.len(), 2);
    }
}

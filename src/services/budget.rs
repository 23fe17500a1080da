//! Budget service
//!
//! Per-category overview for a user, classified under the user's policy.

use crate::error::{FamError, FamResult};
use crate::models::{Budget, BudgetCategory, Money, User};
use crate::policy::{BudgetState, UserPolicy};
use crate::storage::Storage;

/// Service for budget queries
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// One budget with its derived state
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub state: BudgetState,
}

impl BudgetStatus {
    pub fn category(&self) -> BudgetCategory {
        self.budget.category
    }

    pub fn spent(&self) -> Money {
        self.budget.total_spent()
    }

    pub fn remaining(&self) -> Money {
        self.budget.remaining()
    }

    /// Whether the category refuses new transactions for this user
    pub fn is_locked(&self) -> bool {
        self.state == BudgetState::Locked
    }
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Status of every category for a user, ordered by category id
    ///
    /// A registered account without one of its budgets is an invariant
    /// violation, not an empty row.
    pub fn status_for_user(&self, user: &User) -> FamResult<Vec<BudgetStatus>> {
        let policy = UserPolicy::for_user(user);

        BudgetCategory::ALL
            .into_iter()
            .map(|category| {
                let budget = self
                    .storage
                    .budgets
                    .get(&user.account_id, category)?
                    .ok_or_else(|| FamError::budget_missing(&user.account_id, category))?;
                let state = policy.classify(&budget);
                Ok(BudgetStatus { budget, state })
            })
            .collect()
    }

    /// Status of a single category
    pub fn status(&self, user: &User, category: BudgetCategory) -> FamResult<BudgetStatus> {
        let budget = self
            .storage
            .budgets
            .get(&user.account_id, category)?
            .ok_or_else(|| FamError::budget_missing(&user.account_id, category))?;
        let state = UserPolicy::for_user(user).classify(&budget);
        Ok(BudgetStatus { budget, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FamPaths;
    use crate::models::{AccountId, Archetype};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup(archetype: Archetype) -> (TempDir, Storage, User) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FamPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = User::new(
            "Sam",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            AccountId::new("1"),
            archetype,
            dec!(0.5),
        );
        for category in BudgetCategory::ALL {
            storage
                .budgets
                .upsert(Budget::new(AccountId::new("1"), category, Money::from_dollars(40)))
                .unwrap();
        }
        (temp_dir, storage, user)
    }

    fn spend(storage: &Storage, category: BudgetCategory, dollars: i64) {
        let mut budget = storage.budgets.get(&AccountId::new("1"), category).unwrap().unwrap();
        budget.add_spent(Money::from_dollars(dollars)).unwrap();
        storage.budgets.upsert(budget).unwrap();
    }

    #[test]
    fn test_status_for_user() {
        let (_temp, storage, user) = setup(Archetype::Rebel);
        spend(&storage, BudgetCategory::ClothingAccessories, 20);
        spend(&storage, BudgetCategory::Miscellaneous, 40);

        let statuses = BudgetService::new(&storage).status_for_user(&user).unwrap();
        let states: Vec<_> = statuses.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                BudgetState::Ok,
                BudgetState::Warning,
                BudgetState::Ok,
                BudgetState::Locked
            ]
        );
        assert!(statuses[3].is_locked());
        assert_eq!(statuses[1].spent(), Money::from_dollars(20));
        assert_eq!(statuses[1].remaining(), Money::from_dollars(20));
    }

    #[test]
    fn test_same_budget_differs_by_archetype() {
        let (_temp, storage, user) = setup(Archetype::Angel);
        spend(&storage, BudgetCategory::EatingOut, 45);

        let status = BudgetService::new(&storage)
            .status(&user, BudgetCategory::EatingOut)
            .unwrap();
        assert_eq!(status.state, BudgetState::Exceeded);
        assert!(!status.is_locked());
    }

    #[test]
    fn test_missing_budget_is_invariant_violation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FamPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = User::new(
            "Sam",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            AccountId::new("1"),
            Archetype::Rebel,
            dec!(0.5),
        );

        let err = BudgetService::new(&storage).status_for_user(&user).unwrap_err();
        assert!(err.is_invariant_violation());
    }
}

//! Budget repository for JSON storage
//!
//! Manages loading and saving category budgets to budgets.json. Budgets are
//! keyed by (account, category); there is exactly one per pair.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamError;
use crate::models::{AccountId, Budget, BudgetCategory};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budgets
pub type BudgetKey = (AccountId, BudgetCategory);

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FamError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert((budget.account_id.clone(), budget.category), budget);
        }

        Ok(())
    }

    /// Save budgets to disk, ordered by account then category id
    pub fn save(&self) -> Result<(), FamError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| {
            a.account_id
                .cmp(&b.account_id)
                .then(a.category.id().cmp(&b.category.id()))
        });

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get the budget for one account and category
    pub fn get(
        &self,
        account_id: &AccountId,
        category: BudgetCategory,
    ) -> Result<Option<Budget>, FamError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&(account_id.clone(), category)).cloned())
    }

    /// All budgets of an account, ordered by category id
    pub fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Budget>, FamError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| &b.account_id == account_id)
            .cloned()
            .collect();
        list.sort_by_key(|b| b.category.id());
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), FamError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert((budget.account_id.clone(), budget.category), budget);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FamError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}

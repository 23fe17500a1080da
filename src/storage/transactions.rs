//! Transaction repository for JSON storage
//!
//! The transaction log is append-only. Entries keep their insertion order on
//! disk and in every query.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamError;
use crate::models::{AccountId, BudgetCategory, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for the append-only transaction log
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
    /// Index: account_id -> positions in `data`
    by_account: RwLock<HashMap<AccountId, Vec<usize>>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the account index
    pub fn load(&self) -> Result<(), FamError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_account.clear();
        for (pos, txn) in file_data.transactions.iter().enumerate() {
            by_account.entry(txn.account_id.clone()).or_default().push(pos);
        }
        *data = file_data.transactions;

        Ok(())
    }

    /// Save transactions to disk in insertion order
    pub fn save(&self) -> Result<(), FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TransactionData {
            transactions: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append a transaction to the log
    pub fn append(&self, txn: Transaction) -> Result<(), FamError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_account
            .entry(txn.account_id.clone())
            .or_default()
            .push(data.len());
        data.push(txn);
        Ok(())
    }

    /// Drop a transaction from the log
    ///
    /// Only used to undo an append whose commit failed. Positions after the
    /// removed entry shift, so the account index is rebuilt.
    pub fn remove(&self, id: TransactionId) -> Result<Option<Transaction>, FamError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = match data.iter().position(|t| t.id == id) {
            Some(pos) => data.remove(pos),
            None => return Ok(None),
        };

        by_account.clear();
        for (pos, txn) in data.iter().enumerate() {
            by_account.entry(txn.account_id.clone()).or_default().push(pos);
        }
        Ok(Some(removed))
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    /// All transactions of an account, in insertion order
    pub fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Transaction>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let positions = by_account.get(account_id).map(|v| v.as_slice()).unwrap_or(&[]);
        Ok(positions
            .iter()
            .filter_map(|&pos| data.get(pos).cloned())
            .collect())
    }

    /// Transactions of an account in one category, in insertion order
    pub fn list_by_account_and_category(
        &self,
        account_id: &AccountId,
        category: BudgetCategory,
    ) -> Result<Vec<Transaction>, FamError> {
        Ok(self
            .list_by_account(account_id)?
            .into_iter()
            .filter(|t| t.category == category)
            .collect())
    }

    pub fn count(&self) -> Result<usize, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

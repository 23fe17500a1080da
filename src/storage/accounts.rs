//! Account repository for JSON storage
//!
//! Manages loading and saving bank accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamError;
use crate::models::{AccountId, BankAccount};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<BankAccount>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, BankAccount>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), FamError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id.clone(), account);
        }

        Ok(())
    }

    /// Save accounts to disk, ordered by account number
    pub fn save(&self) -> Result<(), FamError> {
        let file_data = AccountData {
            accounts: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an account by number
    pub fn get(&self, id: &AccountId) -> Result<Option<BankAccount>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all accounts, ordered by account number
    pub fn get_all(&self) -> Result<Vec<BankAccount>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    /// Insert or update an account
    pub fn upsert(&self, account: BankAccount) -> Result<(), FamError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id.clone(), account);
        Ok(())
    }

    /// Check if an account number is registered
    pub fn exists(&self, id: &AccountId) -> Result<bool, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(id))
    }

    pub fn count(&self) -> Result<usize, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountKind, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AccountRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        (temp_dir, repo)
    }

    fn account(number: &str) -> BankAccount {
        BankAccount::new(
            AccountId::new(number),
            "Maple Bank",
            AccountKind::Chequing,
            Money::from_dollars(100),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(account("111")).unwrap();

        let retrieved = repo.get(&AccountId::new("111")).unwrap().unwrap();
        assert_eq!(retrieved.bank_name, "Maple Bank");
        assert!(repo.exists(&AccountId::new("111")).unwrap());
        assert!(repo.get(&AccountId::new("999")).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let mut acct = account("222");
        acct.debit(Money::from_dollars(40));
        repo.upsert(acct).unwrap();
        repo.save().unwrap();

        let repo2 = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo2.load().unwrap();

        let retrieved = repo2.get(&AccountId::new("222")).unwrap().unwrap();
        assert_eq!(retrieved.balance, Money::from_dollars(60));
    }

    #[test]
    fn test_get_all_sorted() {
        let (_temp_dir, repo) = create_test_repo();
        for number in ["300", "100", "200"] {
            repo.upsert(account(number)).unwrap();
        }

        let ids: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|a| a.id.to_string())
            .collect();
        assert_eq!(ids, vec!["100", "200", "300"]);
    }
}

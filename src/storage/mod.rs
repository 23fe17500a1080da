//! Storage layer for FAM
//!
//! JSON file storage with atomic writes. `Storage` owns one repository per
//! entity, the audit logger and the commit guard used by the recorder.

pub mod accounts;
pub mod budgets;
pub mod file_io;
pub mod transactions;
pub mod users;

pub use accounts::AccountRepository;
pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FamPaths;
use crate::error::FamError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FamPaths,
    pub accounts: AccountRepository,
    pub budgets: BudgetRepository,
    pub transactions: TransactionRepository,
    pub users: UserRepository,
    audit: AuditLogger,
    commit_lock: Mutex<()>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FamPaths) -> Result<Self, FamError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            users: UserRepository::new(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
            commit_lock: Mutex::new(()),
            paths,
        })
    }

    pub fn paths(&self) -> &FamPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FamError> {
        self.accounts.load()?;
        self.budgets.load()?;
        self.transactions.load()?;
        self.users.load()?;
        debug!(
            accounts = self.accounts.count()?,
            transactions = self.transactions.count()?,
            "loaded storage"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FamError> {
        self.accounts.save()?;
        self.budgets.save()?;
        self.transactions.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Take the guard that serializes recording attempts
    ///
    /// Held for the whole of one recording so that the budget and balance
    /// mutations land together.
    pub fn begin_commit(&self) -> Result<MutexGuard<'_, ()>, FamError> {
        self.commit_lock
            .lock()
            .map_err(|e| FamError::Storage(format!("Failed to acquire commit lock: {}", e)))
    }

    /// Check if storage has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FamError> {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log, with a diff of the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FamError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a lock in the audit log
    pub fn log_lock<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        reason: impl Into<String>,
    ) -> Result<(), FamError> {
        self.write_audit(AuditEntry::lock(
            entity_type,
            entity_id,
            entity_name,
            entity,
            reason,
        ))
    }

    fn write_audit(&self, entry: AuditEntry) -> Result<(), FamError> {
        self.audit.log(&entry).map_err(|e| {
            warn!(error = %e, "failed to write audit entry");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{AccountId, AccountKind, BankAccount, Money};
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let (temp_dir, storage) = create_storage();
        storage
            .accounts
            .upsert(BankAccount::new(
                AccountId::new("42"),
                "Maple Bank",
                AccountKind::Saving,
                Money::from_dollars(10),
            ))
            .unwrap();
        storage.save_all().unwrap();

        let reopened =
            Storage::new(FamPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        reopened.load_all().unwrap();
        assert!(reopened.accounts.exists(&AccountId::new("42")).unwrap());
        assert_eq!(reopened.users.count().unwrap(), 0);
    }

    #[test]
    fn test_log_update_writes_diff() {
        let (_temp_dir, storage) = create_storage();
        let before = BankAccount::new(
            AccountId::new("42"),
            "Maple Bank",
            AccountKind::Chequing,
            Money::from_dollars(10),
        );
        let mut after = before.clone();
        after.debit(Money::from_dollars(4));

        storage
            .log_update(EntityType::Account, "42", None, &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        let diff = entries[0].diff_summary.clone().unwrap();
        assert!(diff.starts_with("balance:"));
        assert!(!diff.contains("updated_at"));
    }

    #[test]
    fn test_commit_guard_released_on_drop() {
        let (_temp_dir, storage) = create_storage();
        {
            let _guard = storage.begin_commit().unwrap();
        }
        assert!(storage.begin_commit().is_ok());
    }
}

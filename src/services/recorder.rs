//! Transaction recorder
//!
//! Runs one recording attempt from start to finish:
//!
//! 1. account gate: a locked account records nothing
//! 2. pre-check: the category may already be past the lockout threshold
//! 3. amount checks: positive, and covered by the balance
//! 4. commit: spend against the budget, debit the balance
//! 5. post-check: lockout, exceeded or warning notice for the category
//! 6. account lock: category, frequency and balance rules
//! 7. store: budget, transaction log and account, saved together
//!
//! Steps 4 to 6 work on copies. Every abort happens before step 7 and leaves
//! storage untouched, and a failed store is rolled back. Aborts are returned
//! as values; errors are reserved for missing entities and storage failures.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{FamError, FamResult};
use crate::models::{BankAccount, Budget, BudgetCategory, LockReason, Money, Transaction, User};
use crate::policy::{recompute_lock, BudgetState, UserPolicy};
use crate::storage::Storage;

/// One spending event to record
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub category: BudgetCategory,
    pub amount: Money,
    pub merchant: String,
}

/// A message produced while recording, in the order it was raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The policy's lockout message for the category
    Lockout(String),
    /// The category's limit is used up (non-blocking)
    BudgetExceeded { category: BudgetCategory, limit: Money },
    /// The policy's warning message for the category
    Warning(String),
    /// Balance is positive but under the configured threshold
    LowBalance { balance: Money, threshold: Money },
    /// This recording locked the account
    AccountLocked(LockReason),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lockout(msg) | Self::Warning(msg) => f.write_str(msg),
            Self::BudgetExceeded { limit, .. } => {
                write!(f, "Notification: You have exceeded your budget limit of {}", limit)
            }
            Self::LowBalance { threshold, .. } => write!(
                f,
                "Notification: Your bank account balance is less than {}.",
                threshold
            ),
            Self::AccountLocked(LockReason::CategoryLockout) => {
                write!(f, "Notification: Your account is locked.")
            }
            Self::AccountLocked(LockReason::NonPositiveBalance) => write!(
                f,
                "Locked: Your account is locked since the bank balance reached zero."
            ),
            Self::AccountLocked(LockReason::TransactionFrequency) => f.write_str(concat!(
                "Locked: Your account is locked. ",
                "Saving accounts allow a limited number of transactions."
            )),
        }
    }
}

/// Why a recording attempt stopped before committing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The account was locked before this attempt
    AccountLocked,
    /// The category is past the lockout threshold and the policy enforces it
    CategoryLocked(BudgetCategory),
    /// Zero or negative amount
    NonPositiveAmount(Money),
    /// Amount larger than the balance
    InsufficientFunds { needed: Money, available: Money },
}

impl AbortReason {
    /// Whether the same request could succeed with a different amount
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveAmount(_) | Self::InsufficientFunds { .. }
        )
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountLocked => write!(
                f,
                "Warning: Could not add another transaction since your account is locked."
            ),
            Self::CategoryLocked(category) => {
                write!(f, "Transaction not recorded: {} is locked.", category)
            }
            Self::NonPositiveAmount(_) => write!(f, "Please enter a positive, non-zero number."),
            Self::InsufficientFunds { available, .. } => write!(
                f,
                "Notification: You have insufficient funds. Current bank account balance: {}",
                available
            ),
        }
    }
}

impl From<AbortReason> for FamError {
    fn from(reason: AbortReason) -> Self {
        match reason {
            AbortReason::InsufficientFunds { needed, available } => {
                FamError::InsufficientFunds { needed, available }
            }
            other => FamError::Validation(other.to_string()),
        }
    }
}

/// A recording attempt that changed nothing
#[derive(Debug, Clone)]
pub struct Abort {
    pub reason: AbortReason,
    /// Notices raised before the abort
    pub notices: Vec<Notice>,
}

/// A committed recording
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transaction: Transaction,
    /// Budget after the commit
    pub budget: Budget,
    /// Account after the commit and lock assessment
    pub account: BankAccount,
    pub notices: Vec<Notice>,
    /// The account's history in this category, when a post-check notice fired
    pub category_history: Option<Vec<Transaction>>,
}

/// Result of one recording attempt
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Committed(Receipt),
    Aborted(Abort),
}

/// Records transactions for users
pub struct TransactionRecorder<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> TransactionRecorder<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Record a transaction timestamped now
    pub fn record(&self, user: &User, request: RecordRequest) -> FamResult<RecordOutcome> {
        self.record_at(user, request, Utc::now())
    }

    /// Record a transaction as of `now`
    pub fn record_at(
        &self,
        user: &User,
        request: RecordRequest,
        now: DateTime<Utc>,
    ) -> FamResult<RecordOutcome> {
        let _guard = self.storage.begin_commit()?;
        let policy = UserPolicy::for_user(user);
        let category = request.category;
        let mut notices = Vec::new();

        let mut account = self
            .storage
            .accounts
            .get(&user.account_id)?
            .ok_or_else(|| FamError::account_not_found(user.account_id.to_string()))?;

        if account.locked {
            return Ok(self.abort(user, AbortReason::AccountLocked, notices));
        }

        let mut budget = self
            .storage
            .budgets
            .get(&account.id, category)?
            .ok_or_else(|| FamError::budget_missing(&account.id, category))?;

        let was_category_locked = policy.is_over_lockout_threshold(budget.limit, budget.spent);
        if was_category_locked {
            notices.push(Notice::Lockout(policy.lockout_message().to_string()));
            if policy.is_lockout_action_required() {
                return Ok(self.abort(user, AbortReason::CategoryLocked(category), notices));
            }
        } else if budget.is_exceeded() {
            notices.push(Notice::BudgetExceeded {
                category,
                limit: budget.limit,
            });
        }

        let amount = request.amount;
        if !amount.is_positive() {
            return Ok(self.abort(user, AbortReason::NonPositiveAmount(amount), notices));
        }
        if amount > account.balance {
            let reason = AbortReason::InsufficientFunds {
                needed: amount,
                available: account.balance,
            };
            return Ok(self.abort(user, reason, notices));
        }

        let transaction =
            Transaction::new(account.id.clone(), category, amount, request.merchant, now);
        transaction
            .validate()
            .map_err(|e| FamError::Validation(e.to_string()))?;

        // Work on copies; nothing is stored until `apply`
        let budget_before = budget.clone();
        let account_before = account.clone();
        budget
            .add_spent(amount)
            .map_err(|e| FamError::Validation(e.to_string()))?;
        account.debit(amount);

        if account.is_low_balance(self.settings.low_balance_threshold) {
            notices.push(Notice::LowBalance {
                balance: account.balance,
                threshold: self.settings.low_balance_threshold,
            });
        }

        let state = policy.classify(&budget);
        match state {
            BudgetState::Locked => {
                notices.push(Notice::Lockout(policy.lockout_message().to_string()))
            }
            BudgetState::Exceeded => notices.push(Notice::BudgetExceeded {
                category,
                limit: budget.limit,
            }),
            BudgetState::Warning => notices.push(Notice::Warning(policy.warning_message())),
            BudgetState::Ok => {}
        }

        let mut history = self.storage.transactions.list_by_account(&account.id)?;
        history.push(transaction.clone());
        let category_history: Option<Vec<Transaction>> = (state != BudgetState::Ok).then(|| {
            history
                .iter()
                .filter(|t| t.category == category)
                .cloned()
                .collect()
        });

        let budgets: Vec<Budget> = self
            .storage
            .budgets
            .list_for_account(&account.id)?
            .into_iter()
            .map(|b| if b.category == category { budget.clone() } else { b })
            .collect();
        // The gate guarantees the account was unlocked, so any lock is new
        let locked = recompute_lock(
            &mut account,
            &budgets,
            &history,
            &policy,
            &self.settings.saving.frequency_limit(),
            now,
        );
        let lock_reason = if locked { account.lock_reason } else { None };
        if let Some(reason) = lock_reason {
            notices.push(Notice::AccountLocked(reason));
        }

        self.apply(
            (&budget_before, &account_before),
            (&budget, &transaction, &account),
        )?;

        self.audit_commit(
            user,
            &transaction,
            (&budget_before, &budget),
            (&account_before, &account),
            state == BudgetState::Locked && !was_category_locked,
        )?;

        info!(
            user = %user.name,
            category = %category,
            amount = %amount,
            balance = %account.balance,
            state = %state,
            "transaction committed"
        );
        if let Some(reason) = lock_reason {
            warn!(user = %user.name, account = %account.id, reason = %reason, "account locked");
        }

        Ok(RecordOutcome::Committed(Receipt {
            transaction,
            budget,
            account,
            notices,
            category_history,
        }))
    }

    fn abort(&self, user: &User, reason: AbortReason, notices: Vec<Notice>) -> RecordOutcome {
        info!(user = %user.name, reason = %reason, "transaction aborted");
        RecordOutcome::Aborted(Abort { reason, notices })
    }

    /// Store a commit in memory and on disk
    ///
    /// On failure the earlier budget and account are put back and the
    /// transaction is dropped from the log before the error is returned.
    fn apply(
        &self,
        before: (&Budget, &BankAccount),
        (budget, transaction, account): (&Budget, &Transaction, &BankAccount),
    ) -> FamResult<()> {
        let stored = self
            .storage
            .budgets
            .upsert(budget.clone())
            .and_then(|_| self.storage.transactions.append(transaction.clone()))
            .and_then(|_| self.storage.accounts.upsert(account.clone()))
            .and_then(|_| self.storage.budgets.save())
            .and_then(|_| self.storage.transactions.save())
            .and_then(|_| self.storage.accounts.save());

        if let Err(e) = stored {
            warn!(account = %account.id, error = %e, "commit failed, rolling back");
            self.rollback(before, transaction);
            return Err(e);
        }
        Ok(())
    }

    fn rollback(&self, (budget, account): (&Budget, &BankAccount), transaction: &Transaction) {
        let steps = [
            self.storage.budgets.upsert(budget.clone()),
            self.storage.transactions.remove(transaction.id).map(|_| ()),
            self.storage.accounts.upsert(account.clone()),
            self.storage.budgets.save(),
            self.storage.transactions.save(),
            self.storage.accounts.save(),
        ];
        for e in steps.into_iter().filter_map(Result::err) {
            warn!(account = %account.id, error = %e, "rollback step failed");
        }
    }

    fn audit_commit(
        &self,
        user: &User,
        transaction: &Transaction,
        (budget_before, budget): (&Budget, &Budget),
        (account_before, account): (&BankAccount, &BankAccount),
        category_newly_locked: bool,
    ) -> FamResult<()> {
        let name = Some(user.name.clone());
        let budget_id = format!("{}/{}", budget.account_id, budget.category.key());

        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            name.clone(),
            transaction,
        )?;
        self.storage.log_update(
            EntityType::Budget,
            budget_id.clone(),
            name.clone(),
            budget_before,
            budget,
        )?;
        self.storage.log_update(
            EntityType::Account,
            account.id.to_string(),
            name.clone(),
            account_before,
            account,
        )?;

        if category_newly_locked {
            let policy = UserPolicy::for_user(user);
            self.storage.log_lock(
                EntityType::Budget,
                budget_id,
                name.clone(),
                budget,
                policy.lockout_message(),
            )?;
        }
        if account.locked && !account_before.locked {
            if let Some(reason) = account.lock_reason {
                self.storage.log_lock(
                    EntityType::Account,
                    account.id.to_string(),
                    name,
                    account,
                    reason.to_string(),
                )?;
            }
        }

        Ok(())
    }
}

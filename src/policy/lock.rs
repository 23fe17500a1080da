//! Derived account lock
//!
//! The account lock is a function of the account, its budgets and its
//! transaction log. Locks are sticky: assessment can add a lock, never
//! remove one.

use chrono::{DateTime, Utc};

use super::UserPolicy;
use crate::models::{
    recent_transaction_count, BankAccount, Budget, BudgetCategory, FrequencyLimit, LockReason,
    Transaction,
};

/// Result of evaluating every account-level lock rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockAssessment {
    /// Whether the account should be locked after this assessment
    pub locked: bool,
    /// Rules that fired, in evaluation order
    pub reasons: Vec<LockReason>,
    /// Categories over the policy's lockout threshold
    pub locked_categories: Vec<BudgetCategory>,
    /// The account's transactions inside the frequency window
    pub recent_transactions: usize,
}

impl LockAssessment {
    /// First rule that fired, if any
    pub fn primary_reason(&self) -> Option<LockReason> {
        self.reasons.first().copied()
    }
}

/// Evaluate the category, frequency and balance rules for an account
///
/// `budgets` and `transactions` may contain entries for other accounts; only
/// the ones owned by `account` are considered.
pub fn assess_lock(
    account: &BankAccount,
    budgets: &[Budget],
    transactions: &[Transaction],
    policy: &UserPolicy,
    limit: &FrequencyLimit,
    now: DateTime<Utc>,
) -> LockAssessment {
    let mut reasons = Vec::new();

    let owned: Vec<&Budget> = budgets
        .iter()
        .filter(|b| b.account_id == account.id)
        .collect();
    let locked_categories: Vec<BudgetCategory> = owned
        .iter()
        .filter(|b| policy.is_over_lockout_threshold(b.limit, b.spent))
        .map(|b| b.category)
        .collect();
    if policy.is_over_account_lockout_threshold(locked_categories.len(), owned.len()) {
        reasons.push(LockReason::CategoryLockout);
    }

    let recent_transactions =
        recent_transaction_count(&account.id, transactions, now, limit.window);
    if account.kind.is_over_limit(recent_transactions, limit) {
        reasons.push(LockReason::TransactionFrequency);
    }

    if account.is_balance_non_positive() {
        reasons.push(LockReason::NonPositiveBalance);
    }

    LockAssessment {
        locked: account.locked || !reasons.is_empty(),
        reasons,
        locked_categories,
        recent_transactions,
    }
}

/// Apply `assess_lock` to the account and return its lock state
pub fn recompute_lock(
    account: &mut BankAccount,
    budgets: &[Budget],
    transactions: &[Transaction],
    policy: &UserPolicy,
    limit: &FrequencyLimit,
    now: DateTime<Utc>,
) -> bool {
    let assessment = assess_lock(account, budgets, transactions, policy, limit, now);
    account.recent_transaction_count = assessment.recent_transactions;
    if let Some(reason) = assessment.primary_reason() {
        account.lock(reason);
    }
    account.locked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountKind, Archetype, Money};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn account(kind: AccountKind, balance: i64) -> BankAccount {
        BankAccount::new(AccountId::new("A1"), "Maple Bank", kind, Money::from_dollars(balance))
    }

    fn budgets(spent: [i64; 4]) -> Vec<Budget> {
        BudgetCategory::ALL
            .into_iter()
            .zip(spent)
            .map(|(category, s)| {
                let mut b = Budget::new(AccountId::new("A1"), category, Money::from_dollars(50));
                if s > 0 {
                    b.add_spent(Money::from_dollars(s)).unwrap();
                }
                b
            })
            .collect()
    }

    fn txn(account: &str, at: DateTime<Utc>) -> Transaction {
        Transaction::new(
            AccountId::new(account),
            BudgetCategory::Miscellaneous,
            Money::from_dollars(1),
            "Shop",
            at,
        )
    }

    fn rebel() -> UserPolicy {
        UserPolicy::new(Archetype::Rebel, dec!(0.5))
    }

    fn assess_now(acct: &BankAccount, budgets: &[Budget], policy: &UserPolicy) -> LockAssessment {
        assess_lock(acct, budgets, &[], policy, &FrequencyLimit::default(), Utc::now())
    }

    fn recompute_now(acct: &mut BankAccount) -> bool {
        recompute_lock(acct, &[], &[], &rebel(), &FrequencyLimit::default(), Utc::now())
    }

    #[test]
    fn test_unlocked_when_nothing_fires() {
        let acct = account(AccountKind::Chequing, 100);
        let a = assess_now(&acct, &budgets([0, 10, 0, 0]), &rebel());
        assert!(!a.locked);
        assert!(a.reasons.is_empty());
        assert!(a.locked_categories.is_empty());
    }

    #[test]
    fn test_rebel_two_locked_categories_locks_account() {
        let acct = account(AccountKind::Chequing, 100);
        let one = assess_now(&acct, &budgets([50, 0, 0, 0]), &rebel());
        assert!(!one.locked);
        assert_eq!(one.locked_categories, vec![BudgetCategory::GamesEntertainment]);

        let two = assess_now(&acct, &budgets([50, 0, 60, 0]), &rebel());
        assert!(two.locked);
        assert_eq!(two.reasons, vec![LockReason::CategoryLockout]);
    }

    #[test]
    fn test_trouble_maker_never_locks_account_for_categories() {
        let acct = account(AccountKind::Chequing, 100);
        let tm = UserPolicy::new(Archetype::TroubleMaker, dec!(0.75));
        let a = assess_now(&acct, &budgets([60, 60, 60, 60]), &tm);
        assert_eq!(a.locked_categories.len(), 4);
        assert!(!a.locked);
    }

    #[test]
    fn test_saving_frequency_window() {
        let now = Utc::now();
        let limit = FrequencyLimit::default();
        let acct = account(AccountKind::Saving, 100);
        let angel = UserPolicy::new(Archetype::Angel, dec!(0.9));

        let aged = vec![txn("A1", now - Duration::days(45)), txn("A1", now)];
        let a = assess_lock(&acct, &[], &aged, &angel, &limit, now);
        assert_eq!(a.recent_transactions, 1);
        assert!(!a.locked);

        let fresh = vec![txn("A1", now - Duration::days(3)), txn("A1", now)];
        let a = assess_lock(&acct, &[], &fresh, &angel, &limit, now);
        assert_eq!(a.reasons, vec![LockReason::TransactionFrequency]);

        // Other accounts' activity doesn't count
        let mixed = vec![txn("B2", now - Duration::days(1)), txn("A1", now)];
        assert!(!assess_lock(&acct, &[], &mixed, &angel, &limit, now).locked);

        let chequing = account(AccountKind::Chequing, 100);
        assert!(!assess_lock(&chequing, &[], &fresh, &angel, &limit, now).locked);
    }

    #[test]
    fn test_non_positive_balance_locks() {
        let acct = account(AccountKind::Chequing, 0);
        let a = assess_now(&acct, &[], &rebel());
        assert_eq!(a.reasons, vec![LockReason::NonPositiveBalance]);
    }

    #[test]
    fn test_recompute_lock_is_sticky() {
        let mut acct = account(AccountKind::Chequing, 0);
        assert!(recompute_now(&mut acct));
        assert_eq!(acct.lock_reason, Some(LockReason::NonPositiveBalance));

        acct.balance = Money::from_dollars(500);
        assert!(recompute_now(&mut acct));
        assert_eq!(acct.lock_reason, Some(LockReason::NonPositiveBalance));
    }

    #[test]
    fn test_recompute_lock_records_window_count() {
        let now = Utc::now();
        let mut acct = account(AccountKind::Saving, 100);
        let log = vec![txn("A1", now)];
        let angel = UserPolicy::new(Archetype::Angel, dec!(0.9));
        assert!(!recompute_lock(&mut acct, &[], &log, &angel, &FrequencyLimit::default(), now));
        assert_eq!(acct.recent_transaction_count, 1);
    }
}

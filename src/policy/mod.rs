//! Per-archetype spending policy
//!
//! A `UserPolicy` answers every threshold question the recorder asks about a
//! budget. The archetype-specific parts come from a static `ArchetypeRules`
//! table; the only per-user state is the warning threshold.

pub mod lock;

use rust_decimal::Decimal;
use std::fmt;

use crate::models::{Archetype, Budget, Money, User};

pub use lock::{assess_lock, recompute_lock, LockAssessment};

/// Static, archetype-specific rules
#[derive(Debug)]
pub struct ArchetypeRules {
    /// Multiple of the limit at which a category locks; `None` never locks
    pub lockout_multiplier: Option<Decimal>,
    /// Whether reaching the lockout threshold blocks further spending
    pub aborts_on_lockout: bool,
    /// Account-wide lockout rule over (locked categories, total categories)
    pub account_lockout: fn(usize, usize) -> bool,
    /// Text shown when the lockout threshold is reached
    pub lockout_message: &'static str,
}

fn never_locks_account(_locked: usize, _total: usize) -> bool {
    false
}

fn rebel_locks_account(locked: usize, total: usize) -> bool {
    locked >= total || locked >= 2
}

static ANGEL_RULES: ArchetypeRules = ArchetypeRules {
    lockout_multiplier: None,
    aborts_on_lockout: false,
    account_lockout: never_locks_account,
    lockout_message: "Notification: You have exceeded your budget limit.",
};

static REBEL_RULES: ArchetypeRules = ArchetypeRules {
    lockout_multiplier: Some(Decimal::ONE),
    aborts_on_lockout: true,
    account_lockout: rebel_locks_account,
    lockout_message: "Locked: You have exceeded your budget limit.",
};

// 1.2 = 12 * 10^-1
static TROUBLE_MAKER_RULES: ArchetypeRules = ArchetypeRules {
    lockout_multiplier: Some(Decimal::from_parts(12, 0, 0, false, 1)),
    aborts_on_lockout: true,
    account_lockout: never_locks_account,
    lockout_message: "Locked: You have been locked out of this budget category.",
};

/// Whether `spent` (non-positive) has used up `threshold`
///
/// An overflowing sum has the sign of whichever side is out of range.
fn is_at_or_past(threshold: Money, spent: Money) -> bool {
    match threshold.checked_add(spent) {
        Some(remaining) => !remaining.is_positive(),
        None => spent.is_negative(),
    }
}

impl ArchetypeRules {
    /// Look up the rules for an archetype
    pub fn for_archetype(archetype: Archetype) -> &'static ArchetypeRules {
        match archetype {
            Archetype::Angel => &ANGEL_RULES,
            Archetype::Rebel => &REBEL_RULES,
            Archetype::TroubleMaker => &TROUBLE_MAKER_RULES,
        }
    }
}

/// Where a budget stands under a policy, in post-check priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Ok,
    Warning,
    Exceeded,
    Locked,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
            Self::Locked => write!(f, "Locked"),
        }
    }
}

/// Policy for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPolicy {
    archetype: Archetype,
    warning_threshold: Decimal,
}

impl UserPolicy {
    pub fn new(archetype: Archetype, warning_threshold: Decimal) -> Self {
        Self {
            archetype,
            warning_threshold,
        }
    }

    /// Policy for a registered user
    pub fn for_user(user: &User) -> Self {
        Self::new(user.archetype, user.warning_threshold)
    }

    fn rules(&self) -> &'static ArchetypeRules {
        ArchetypeRules::for_archetype(self.archetype)
    }

    /// Whether spending has reached the point where this archetype locks
    ///
    /// `spent` is the budget's non-positive accumulator.
    pub fn is_over_lockout_threshold(&self, limit: Money, spent: Money) -> bool {
        match self.rules().lockout_multiplier {
            Some(multiplier) => is_at_or_past(limit.scale(multiplier), spent),
            None => false,
        }
    }

    /// Whether spending has reached the warning fraction of the limit
    pub fn is_exceed_warning_threshold(&self, limit: Money, spent: Money) -> bool {
        is_at_or_past(limit.scale(self.warning_threshold), spent)
    }

    /// Whether hitting the lockout threshold blocks further spending
    pub fn is_lockout_action_required(&self) -> bool {
        self.rules().aborts_on_lockout
    }

    /// Whether enough categories are locked to freeze the whole account
    pub fn is_over_account_lockout_threshold(&self, num_locked: usize, total: usize) -> bool {
        (self.rules().account_lockout)(num_locked, total)
    }

    /// "Warning: You have exceeded {pct}% of this budget."
    pub fn warning_message(&self) -> String {
        let pct = (self.warning_threshold * Decimal::ONE_HUNDRED).trunc();
        format!("Warning: You have exceeded {}% of this budget.", pct.normalize())
    }

    pub fn lockout_message(&self) -> &'static str {
        self.rules().lockout_message
    }

    /// Classify a budget. Locked wins over Exceeded, which wins over Warning.
    pub fn classify(&self, budget: &Budget) -> BudgetState {
        if self.is_over_lockout_threshold(budget.limit, budget.spent) {
            BudgetState::Locked
        } else if budget.is_exceeded() {
            BudgetState::Exceeded
        } else if self.is_exceed_warning_threshold(budget.limit, budget.spent) {
            BudgetState::Warning
        } else {
            BudgetState::Ok
        }
    }
}

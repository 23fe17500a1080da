//! User model
//!
//! A user is one child. Each child has exactly one bank account and an
//! archetype that decides how strictly their budgets are enforced.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};

/// Behavioural archetype of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Trusted: only ever warned, never locked
    Angel,
    /// Locked at the limit, and account-wide once two categories lock
    Rebel,
    /// Locked per category past a 20% grace buffer
    TroubleMaker,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Self::Rebel, Self::Angel, Self::TroubleMaker];

    /// Parse archetype from string
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "1" | "rebel" => Some(Self::Rebel),
            "2" | "angel" => Some(Self::Angel),
            "3" | "troublemaker" => Some(Self::TroubleMaker),
            _ => None,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Angel => write!(f, "Angel"),
            Self::Rebel => write!(f, "Rebel"),
            Self::TroubleMaker => write!(f, "TroubleMaker"),
        }
    }
}

/// A registered child
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name, unique case-insensitively
    pub name: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// The account this user spends from
    pub account_id: AccountId,

    /// Fixed at registration
    pub archetype: Archetype,

    /// Fraction of a limit at which a warning is shown, in (0, 1]
    pub warning_threshold: Decimal,

    /// When the user was registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        account_id: AccountId,
        archetype: Archetype,
        warning_threshold: Decimal,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into().trim().to_string(),
            date_of_birth,
            account_id,
            archetype,
            warning_threshold,
            created_at: Utc::now(),
        }
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.date_of_birth, today)
    }

    /// Validate the user
    pub fn validate(&self, today: NaiveDate) -> Result<(), UserValidationError> {
        if self.name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(UserValidationError::NameTooLong(self.name.len()));
        }

        if self.date_of_birth > today {
            return Err(UserValidationError::BornInFuture(self.date_of_birth));
        }

        if self.warning_threshold <= Decimal::ZERO || self.warning_threshold > Decimal::ONE {
            return Err(UserValidationError::ThresholdOutOfRange(
                self.warning_threshold,
            ));
        }

        Ok(())
    }
}

/// Age in whole years; the birthday only counts once it has been reached
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    if today < date_of_birth {
        return 0;
    }
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.archetype)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong(usize),
    BornInFuture(NaiveDate),
    ThresholdOutOfRange(Decimal),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "User name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "User name too long ({} chars, max 50)", len),
            Self::BornInFuture(date) => write!(f, "Date of birth {} is in the future", date),
            Self::ThresholdOutOfRange(t) => {
                write!(f, "Warning threshold must be in (0, 1], got {}", t)
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(archetype: Archetype) -> User {
        User::new(
            " Sam ",
            date(2010, 6, 15),
            AccountId::new("123"),
            archetype,
            dec!(0.5),
        )
    }

    #[test]
    fn test_new_trims_name() {
        assert_eq!(user(Archetype::Rebel).name, "Sam");
    }

    #[test]
    fn test_age_counts_birthday_only_once_reached() {
        let u = user(Archetype::Rebel);
        assert_eq!(u.age_on(date(2026, 6, 14)), 15);
        assert_eq!(u.age_on(date(2026, 6, 15)), 16);
        assert_eq!(u.age_on(date(2027, 1, 1)), 16);
        assert_eq!(u.age_on(date(2009, 1, 1)), 0);
    }

    #[test]
    fn test_validation() {
        let today = date(2026, 1, 1);
        let mut u = user(Archetype::Angel);
        assert!(u.validate(today).is_ok());

        u.warning_threshold = dec!(0);
        assert!(matches!(
            u.validate(today),
            Err(UserValidationError::ThresholdOutOfRange(_))
        ));
        u.warning_threshold = dec!(1.01);
        assert!(u.validate(today).is_err());
        u.warning_threshold = dec!(1);
        assert!(u.validate(today).is_ok());

        u.date_of_birth = date(2027, 1, 1);
        assert!(matches!(
            u.validate(today),
            Err(UserValidationError::BornInFuture(_))
        ));

        u.date_of_birth = date(2010, 1, 1);
        u.name = String::new();
        assert_eq!(u.validate(today), Err(UserValidationError::EmptyName));
    }

    #[test]
    fn test_archetype_parsing() {
        assert_eq!(Archetype::parse("angel"), Some(Archetype::Angel));
        assert_eq!(Archetype::parse("REBEL"), Some(Archetype::Rebel));
        assert_eq!(Archetype::parse("trouble-maker"), Some(Archetype::TroubleMaker));
        assert_eq!(Archetype::parse("TroubleMaker"), Some(Archetype::TroubleMaker));
        assert_eq!(Archetype::parse("3"), Some(Archetype::TroubleMaker));
        assert_eq!(Archetype::parse("saint"), None);
    }

    #[test]
    fn test_serialization() {
        let u = user(Archetype::TroubleMaker);
        let json = serde_json::to_string(&u).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();
        assert_eq!(u.id, deserialized.id);
        assert_eq!(deserialized.archetype, Archetype::TroubleMaker);
        assert_eq!(deserialized.warning_threshold, dec!(0.5));
    }
}

//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so that fractional policy thresholds
//! (warning percentages, the 120% grace buffer) can be applied to amounts
//! without floating-point drift.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest magnitude accepted from user input: one billion dollars
    pub const MAX: Money = Money(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Wrap a decimal amount
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fam::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money amount from whole dollars
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a dimensionless factor (e.g. a warning threshold)
    ///
    /// Saturates at the decimal range instead of overflowing.
    pub fn scale(&self, factor: Decimal) -> Self {
        match self.checked_scale(factor) {
            Some(scaled) => scaled,
            None if self.0.is_sign_negative() != factor.is_sign_negative() => Self(Decimal::MIN),
            None => Self(Decimal::MAX),
        }
    }

    pub fn checked_scale(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00".
    /// At most two decimal places, and no more than `Money::MAX` in magnitude.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

        if rest.is_empty() || rest.starts_with('-') || rest.starts_with('+') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: Decimal = rest
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        if value.normalize().scale() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }
        if value > Self::MAX.0 {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Round half away from zero to whole cents
    fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-${:.2}", rounded.abs())
        } else {
            write!(f, "${:.2}", rounded.abs())
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// More than two decimal places
    TooPrecise(String),
    /// Larger than `Money::MAX`
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount is larger than {}: {}", Money::MAX, s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

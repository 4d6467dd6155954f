//! Money value object backed by exact decimal arithmetic.
//!
//! All monetary derivation (PRISM, unit cost, annual cost, aggregates) runs
//! on `rust_decimal::Decimal`. Rounding happens only at the presentation
//! boundary, never inside a computation chain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::ValidationError;

/// A currency amount with exact decimal semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a Money from a raw decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a non-negative Money, rejecting negative amounts.
    pub fn non_negative(field: &str, amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() {
            return Err(ValidationError::negative(field));
        }
        Ok(Self(amount))
    }

    /// Returns the exact inner amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The amount rounded to cents, for presentation only.
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }

    /// Multiplies by a dimensionless decimal factor.
    pub fn scale_by(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

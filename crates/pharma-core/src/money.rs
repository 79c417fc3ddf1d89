//! # Money Module
//!
//! Provides the `Money` type for monetary values in the cost engine.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    100 × 0.14 = 14.000000000000002   ❌                                 │
//! │    114 / 0.8  = 142.49999999999997   ❌                                 │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, no intermediate rounding                │
//! │    100 × 0.14 = 14                   ✅                                 │
//! │    114 / 0.8  = 142.5                ✅                                 │
//! │                                                                         │
//! │  Rounding happens only at display time (reports, UI).                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharma_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let materials = Money::new(dec!(50));
//! let fees = Money::new(dec!(50));
//! let base = materials + fees;
//! assert_eq!((base * dec!(0.14)).amount(), dec!(14));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Decimal places used when an amount is shown to a person.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the ERP's single operating currency.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, 28 significant digits
/// - **No implicit rounding**: every operator is exact; call
///   [`Money::round_for_display`] at the edge
/// - **Saturating**: operators pin at the `Decimal` bounds instead of
///   panicking, so the cost engine stays total over any parsed input
/// - **JSON number**: serializes as a plain number for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    Decimal,
);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is exactly zero (any scale).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Addition that pins at the `Decimal` bounds instead of panicking.
    #[inline]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// This amount as a percentage of `whole`: `(self / whole) × 100`.
    ///
    /// Returns zero when `whole` is zero or the ratio is not representable.
    pub fn percent_of(&self, whole: Money) -> Decimal {
        self.0
            .checked_div(whole.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Rounds to two decimal places using Bankers Rounding (round half to even).
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(10.125)).round_for_display().amount(), dec!(10.12));
    /// assert_eq!(Money::new(dec!(10.135)).round_for_display().amount(), dec!(10.14));
    /// ```
    pub fn round_for_display(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to two places, e.g. `142.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_for_display().0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Scaling by a rate or multiplier.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0.saturating_mul(factor))
    }
}

/// Division by zero or an overflowing quotient pins at the bound matching
/// the sign of the result.
impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, divisor: Decimal) -> Self {
        match self.0.checked_div(divisor) {
            Some(quotient) => Money(quotient),
            None if self.0.is_sign_negative() != divisor.is_sign_negative() => Money(Decimal::MIN),
            None => Money(Decimal::MAX),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(142.5)).to_string(), "142.50");
        assert_eq!(Money::new(dec!(14)).to_string(), "14.00");
        assert_eq!(Money::new(dec!(-5.5)).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let base = Money::new(dec!(100));
        assert_eq!((base * dec!(0.14)).amount(), dec!(14));
        assert_eq!((Money::new(dec!(114)) / dec!(0.8)).amount(), dec!(142.5));
        assert_eq!((Money::new(dec!(0.1)) + Money::new(dec!(0.2))).amount(), dec!(0.3));
    }

    #[test]
    fn test_equality_ignores_scale() {
        assert_eq!(Money::new(dec!(50.00)), Money::new(dec!(50)));
    }

    #[test]
    fn test_percent_of() {
        let part = Money::new(dec!(25));
        let whole = Money::new(dec!(200));
        assert_eq!(part.percent_of(whole), dec!(12.5));
        assert_eq!(part.percent_of(Money::zero()), Decimal::ZERO);
    }

    #[test]
    fn test_operators_saturate() {
        let max = Money::new(Decimal::MAX);
        assert_eq!((max * dec!(20)).amount(), Decimal::MAX);
        assert_eq!((max / dec!(0.05)).amount(), Decimal::MAX);
        assert_eq!((Money::new(Decimal::MIN) - max).amount(), Decimal::MIN);
        assert_eq!((Money::new(dec!(1)) / Decimal::ZERO).amount(), Decimal::MAX);
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = vec![Money::new(Decimal::MAX), Money::new(dec!(1))]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::new(dec!(0.00)).is_zero());
        assert!(Money::new(dec!(1)).is_positive());
        assert!(Money::new(dec!(-1)).is_negative());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::new(dec!(142.5))).unwrap();
        assert_eq!(json, "142.5");
    }
}

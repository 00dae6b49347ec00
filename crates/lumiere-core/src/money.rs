//! # Money Module
//!
//! Provides the `Money` type for product prices and cart subtotals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart of three $19.90 lipsticks summed as floats can render as       │
//! │  $59.699999999999996 in the cart drawer.                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1990 cents × 3 = 5970 cents → "$59.70"                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lumiere_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1990); // $19.90
//!
//! // Or parse the decimal string a catalog feed hands us
//! let parsed: Money = "19.90".parse().unwrap();
//! assert_eq!(price, parsed);
//!
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "$59.70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Parsing accepts negatives so validation can reject
///   them with a precise message instead of a format error
/// - **Single field tuple struct**: Zero-cost abstraction over i64,
///   serialized as a bare JSON integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// Cart quantities carry no upper bound, so a line total can in theory
    /// exceed what fits in cents; it pins at the bound instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds two amounts, saturating at the i64 bounds.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"24"`, `"24.5"` or `"24.50"`.
///
/// ## Rules
/// - Optional leading `-`
/// - At least one digit before the decimal point
/// - Zero, one or two digits after it (`"24.5"` is 2450 cents)
/// - Surrounding whitespace is ignored
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (digits, None),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }

        let minor_cents = match minor {
            None => 0,
            Some(frac)
                if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) =>
            {
                return Err(invalid("expected one or two digits after the decimal point"));
            }
            Some(frac) => {
                let value: i64 = frac
                    .parse()
                    .map_err(|_| invalid("expected one or two digits after the decimal point"))?;
                if frac.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let cents = major
            .parse::<i64>()
            .ok()
            .and_then(|m| m.checked_mul(100))
            .and_then(|c| c.checked_add(minor_cents))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// For logs and the CLI. The storefront formats prices itself to
/// handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates at the `i64` bounds.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing saturates, matching [`Money::saturating_add`].
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10.99".parse::<Money>().unwrap().cents(), 1099);
        assert_eq!("0.07".parse::<Money>().unwrap().cents(), 7);
        assert_eq!(" 24.50 ".parse::<Money>().unwrap().cents(), 2450);
        assert_eq!("-3.20".parse::<Money>().unwrap().cents(), -320);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", ".", ".5", "1.", "1.234", "abc", "1,50", "--1", "1e3"] {
            let result = input.parse::<Money>();
            assert!(
                matches!(result, Err(ValidationError::InvalidFormat { .. })),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let result = "92233720368547758.08".parse::<Money>();
        assert!(result.is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_addition_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);

        let mut debt = Money::from_cents(i64::MIN);
        debt += Money::from_cents(-1);
        assert_eq!(debt.cents(), i64::MIN);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let price = Money::from_cents(2);
        assert_eq!(price.multiply_quantity(i64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);

        let pinned: Money = [Money::from_cents(i64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(pinned.cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(1990)).unwrap();
        assert_eq!(json, "1990");
    }
}

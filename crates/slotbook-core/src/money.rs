//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004                │
//! │                                                                     │
//! │  OUR SOLUTION: integer cents.                                       │
//! │  A 10% discount on 18_000 cents is exactly 1_800 cents; where a     │
//! │  percentage does not divide evenly we round explicitly, once.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use slotbook_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(20_000); // 200.00
//!
//! // A 10% discount, floored at zero
//! let discount = price.percentage_of(1_000);
//! assert_eq!(price.saturating_sub(discount).cents(), 18_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for adjustments and refunds downstream
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a bare integer in JSON configs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts, flooring the result at zero.
    ///
    /// Discounts never drive a price below zero:
    /// `max(base - discount, 0)`.
    ///
    /// ## Example
    /// ```rust
    /// use slotbook_core::money::Money;
    ///
    /// let base = Money::from_cents(500);
    /// let discount = Money::from_cents(800);
    /// assert_eq!(base.saturating_sub(discount), Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Returns the given fraction of this amount, in basis points.
    ///
    /// 1 basis point = 0.01%, so `percentage_of(1_000)` is 10%.
    /// Uses integer math with half-up rounding: `(n * bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use slotbook_core::money::Money;
    ///
    /// let base = Money::from_cents(20_000); // 200.00
    /// assert_eq!(base.percentage_of(1_000).cents(), 2_000); // 10% = 20.00
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        // i128 prevents overflow on large amounts
        let part = (self.0 as i128 * bps as i128 + 5_000) / 10_000;
        Money(part as i64)
    }

    /// Calculates tax on this amount at the given rate.
    ///
    /// Same integer rounding as [`Money::percentage_of`]; the rate is in
    /// basis points (1800 = 18%).
    ///
    /// ## Example
    /// ```rust
    /// use slotbook_core::money::Money;
    /// use slotbook_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(18_000);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1800));
    /// assert_eq!(tax.cents(), 3_240);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging and logs; presentation-layer formatting (currency symbol,
/// localization) happens outside the core.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let base = Money::from_cents(500);
        assert_eq!(base.saturating_sub(Money::from_cents(200)).cents(), 300);
        assert_eq!(base.saturating_sub(Money::from_cents(800)).cents(), 0);
    }

    #[test]
    fn test_percentage_of() {
        // 10% of 200.00 = 20.00
        assert_eq!(Money::from_cents(20_000).percentage_of(1_000).cents(), 2_000);
        // 100% is the amount itself
        assert_eq!(Money::from_cents(777).percentage_of(10_000).cents(), 777);
        // 0% is zero
        assert!(Money::from_cents(777).percentage_of(0).is_zero());
    }

    #[test]
    fn test_percentage_rounding_half_up() {
        // 8.25% of 10.00 = 0.825 -> rounds to 0.83
        assert_eq!(Money::from_cents(1_000).percentage_of(825).cents(), 83);
    }

    #[test]
    fn test_tax_calculation() {
        let subtotal = Money::from_cents(18_000);
        let tax = subtotal.calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.cents(), 3_240);

        assert!(subtotal.calculate_tax(TaxRate::zero()).is_zero());
    }

    #[test]
    fn test_serde_transparent() {
        let m: Money = serde_json::from_str("12500").unwrap();
        assert_eq!(m.cents(), 12_500);
        assert_eq!(serde_json::to_string(&m).unwrap(), "12500");
    }
}

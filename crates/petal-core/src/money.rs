//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix that, but they round too early for our totals:      │
//! │    10% off $130.97 = $13.097   ← three decimal places                  │
//! │    5% tax on $117.873 = $5.89365 ← five decimal places                 │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-Point Decimal                                      │
//! │    Amounts accumulate exactly, at full precision.                       │
//! │    Rounding to cents happens ONCE, at display time.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petal_core::money::Money;
//!
//! let price = Money::from_major_minor(45, 99); // $45.99
//!
//! // Arithmetic operations are exact
//! let doubled = price * 2;
//! assert_eq!(doubled, Money::from_major_minor(91, 98));
//!
//! let total = doubled + Money::from_major_minor(38, 99);
//! assert_eq!(total, Money::from_major_minor(130, 97));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact fixed-point decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for refunds and deltas
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Unrounded**: Intermediate amounts keep full precision; `rounded()`
///   snaps to cents for display and tendering comparisons
/// - **Wire shape**: Serializes as a plain JSON number
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► CartLine unit price ──► line total                │
/// │                  │                                                      │
/// │                  └──► Displayed as "$45.99" in UI                       │
/// │                                                                         │
/// │  subtotal ──► discount ──► tax ──► total ──► Payment.tendered           │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50 (refund)
    /// assert_eq!(format!("{negative}"), "-$5.50");
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        let cents = if major < 0 {
            major * 100 - minor
        } else {
            major * 100 + minor
        };
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying exact decimal amount.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to cents using Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.125 → 0.13, 0.135 → 0.14, 0.145 → 0.15 (always up = +bias)    │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN digit:                │
    /// │    0.125 → 0.12, 0.135 → 0.14, 0.145 → 0.14 (alternates = no bias) │
    /// │                                                                     │
    /// │  Over many transactions, this prevents systematic loss/gain        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## When To Round
    /// Only at the boundary: receipt display, cash tendering comparisons,
    /// report output. Totals accumulate unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::new(Decimal::new(12376665, 5)); // $123.76665
    /// assert_eq!(total.rounded(), Money::from_major_minor(123, 77));
    /// ```
    #[inline]
    pub fn rounded(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Calculates the tax portion at the given rate, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    /// use petal_core::types::TaxRate;
    ///
    /// let taxable = Money::from_major_minor(10, 0); // $10.00
    /// let rate = TaxRate::from_bps(500);            // 5%
    /// assert_eq!(taxable.calculate_tax(rate), Money::from_major_minor(0, 50));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Taxable: $117.873
    ///      │
    ///      ▼
    /// calculate_tax(5%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $5.89365 (exact; rounded only for the receipt)
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.as_decimal())
    }

    /// Returns the given percentage of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major_minor(130, 97);
    /// let ten_percent = subtotal.percentage(Decimal::from(10));
    /// assert_eq!(ten_percent, Money::new(Decimal::new(13097, 3))); // $13.097
    /// ```
    #[inline]
    pub fn percentage(&self, percent: Decimal) -> Money {
        Money(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::money::Money;
    ///
    /// let unit_price = Money::from_major_minor(45, 99);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total, Money::from_major_minor(91, 98));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money rounded to cents.
///
/// ## Note
/// This is for receipts and logs. The stored value stays unrounded;
/// only the rendering snaps to two decimal places.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

/// Summation over line contributions.
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
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
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.amount(), dec!(10.99));

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.amount(), dec!(-5.50));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_major_minor(10, 99)), "$10.99");
        assert_eq!(format!("{}", Money::from_major_minor(5, 0)), "$5.00");
        assert_eq!(format!("{}", Money::from_major_minor(-5, 50)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");

        // Unrounded amounts render rounded
        assert_eq!(format!("{}", Money::new(dec!(123.76665))), "$123.77");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major_minor(10, 0);
        let b = Money::from_major_minor(5, 0);

        assert_eq!(a + b, Money::from_major_minor(15, 0));
        assert_eq!(a - b, Money::from_major_minor(5, 0));
        assert_eq!(a * 3, Money::from_major_minor(30, 0));

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc, b);
    }

    #[test]
    fn test_sum() {
        let lines = vec![
            Money::from_major_minor(91, 98),
            Money::from_major_minor(38, 99),
        ];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal, Money::from_major_minor(130, 97));
    }

    #[test]
    fn test_tax_is_unrounded() {
        // $117.873 at 5% = $5.89365 exactly
        let taxable = Money::new(dec!(117.873));
        let tax = taxable.calculate_tax(TaxRate::from_bps(500));
        assert_eq!(tax.amount(), dec!(5.89365));
    }

    #[test]
    fn test_percentage_is_unrounded() {
        // 10% of $130.97 = $13.097 exactly
        let subtotal = Money::from_major_minor(130, 97);
        let discount = subtotal.percentage(dec!(10));
        assert_eq!(discount.amount(), dec!(13.097));
    }

    #[test]
    fn test_rounded_uses_bankers_rounding() {
        assert_eq!(Money::new(dec!(2.125)).rounded().amount(), dec!(2.12));
        assert_eq!(Money::new(dec!(2.135)).rounded().amount(), dec!(2.14));
        assert_eq!(Money::new(dec!(2.145)).rounded().amount(), dec!(2.14));

        // Non-midpoint values round normally
        assert_eq!(Money::new(dec!(123.76665)).rounded().amount(), dec!(123.77));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_major_minor(1, 0);
        assert!(positive.is_positive());

        let negative = Money::from_major_minor(-1, 0);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_major_minor(45, 99);
        assert_eq!(
            unit_price.multiply_quantity(2),
            Money::from_major_minor(91, 98)
        );
    }
}

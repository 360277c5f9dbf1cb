//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A bill here is exact all the way down:                                │
//! │    1000 × 10% = 100 → 900 × 12.5% = 112.5 → total 1012.5               │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 decimals (rust_decimal)                          │
//! │    Stored amounts are exact, unrounded products.                        │
//! │    Rounding to 2 places happens ONLY when formatting for paper.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use shelfmark_core::money::{Money, Percent};
//!
//! let price = Money::new(dec!(499.50));
//! let line_total = price.checked_mul(3).unwrap();   // 1498.50
//! let gst = line_total.checked_percent(Percent::new(dec!(5))).unwrap();
//!
//! assert_eq!(gst, Money::new(dec!(74.925)));        // exact, not rounded
//! assert_eq!(gst.fixed(), "74.93");                 // rounded for display
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the shop's single currency.
///
/// ## Design Decisions
/// - **Decimal**: Exact base-10 arithmetic, fractional percentages included
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Transparent serde**: Serialized as a decimal string, so JSON never
///   round-trips an amount through `f64`
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► SaleItem.unit_price ──► SaleItem.line_total       │
/// │                  │                                                      │
/// │                  └──► Printed as "₹499.50" on labels                    │
/// │                                                                         │
/// │  subtotal ──► discount ──► taxable ──► GST ──► total ──► balance due   │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use shelfmark_core::money::Money;
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

    /// Checks if the value is strictly below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Restricts the value to `[low, high]`.
    ///
    /// `high` wins when the bounds cross, so a zero-valued bill always
    /// clamps any payment to zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shelfmark_core::money::Money;
    ///
    /// let total = Money::new(dec!(945));
    /// assert_eq!(Money::new(dec!(1200)).clamp_to(Money::zero(), total), total);
    /// assert_eq!(Money::new(dec!(-5)).clamp_to(Money::zero(), total), Money::zero());
    /// ```
    pub fn clamp_to(self, low: Money, high: Money) -> Money {
        if self > high {
            high
        } else if self < low {
            low.min(high)
        } else {
            self
        }
    }

    /// Returns `self × percent / 100`, unrounded, or `None` past the
    /// decimal range.
    ///
    /// ## User Workflow
    /// ```text
    /// Taxable: 900
    ///      │
    ///      ▼
    /// checked_percent(GST 5%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// GST: 45
    /// ```
    ///
    /// The rate is scaled down first, so a rate of at most 100% never
    /// overflows.
    pub fn checked_percent(&self, percent: Percent) -> Option<Money> {
        let rate = percent.value().checked_div(Decimal::ONE_HUNDRED)?;
        self.0.checked_mul(rate).map(Money)
    }

    /// `self + other`, or `None` past the decimal range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Line total for `qty` units, or `None` past the decimal range.
    #[inline]
    pub fn checked_mul(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Sums amounts, or `None` if the total leaves the decimal range.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Formats with exactly two decimal places, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shelfmark_core::money::Money;
    ///
    /// assert_eq!(Money::new(dec!(945)).fixed(), "945.00");
    /// assert_eq!(Money::new(dec!(0.125)).fixed(), "0.13");
    /// ```
    pub fn fixed(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the 2dp document form without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fixed())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
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


// =============================================================================
// Percent Type
// =============================================================================

/// A percentage such as a GST rate or a bill discount (`5` means 5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percent(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Restricts the percentage to `[0, max]`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shelfmark_core::money::Percent;
    ///
    /// let max = Percent::new(dec!(28));
    /// assert_eq!(Percent::new(dec!(40)).clamp_to(max), max);
    /// assert_eq!(Percent::new(dec!(-3)).clamp_to(max), Percent::zero());
    /// ```
    pub fn clamp_to(self, max: Percent) -> Percent {
        Percent(self.0.max(Decimal::ZERO).min(max.0))
    }
}

/// Display rounds to at most two places and drops trailing zeros (`12.5`, `5`).
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.round_dp(2).normalize())
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Percent(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

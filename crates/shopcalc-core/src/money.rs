//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    5682.97 × 1.5 = 8524.454999999999  → rounds the wrong way at .5     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    568297 cents × 15000 bps = 8524455000 (exact)                       │
//! │    ÷ 1_000_000 → 8524.455 → 8524 whole units (exact rounding)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every rounding step in the engine is round-half-away-from-zero, the
//! conventional currency rule. Two granularities exist:
//! - to the cent (per-order products, transaction fees, fixed amounts)
//! - to the whole currency unit (seasonal projection months)
//!
//! ## Usage
//! ```rust
//! use shopcalc_core::money::Money;
//!
//! let price = Money::from_cents(4999); // $49.99
//! let annual = price * 12;
//! assert_eq!(annual.cents(), 59_988);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(49.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

use crate::types::Rate;

/// Cents in one whole currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Net profit is negative whenever costs exceed revenue
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as cents**: Formatting is the presentation layer's job
///
/// ## Where Money Flows
/// ```text
/// StoreInputs.selling_price ──► CostBreakdown.revenue ──► projection baseline
///                                        │
/// PlanTier.monthly_cost ──► fixed_costs ─┴─► total_costs ──► net_profit
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::money::Money;
    ///
    /// let fee = Money::from_cents(30); // 30¢
    /// assert_eq!(fee.cents(), 30);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * CENTS_PER_UNIT)
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
    /// use shopcalc_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a chain of rates and rounds to the nearest whole currency unit.
    ///
    /// All factors are multiplied exactly before the single rounding step, so
    /// `scale_to_units(&[1.5, 0.7])` equals `round(amount × 1.05)`, not
    /// `round(round(amount × 1.5) × 0.7)`.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::money::Money;
    /// use shopcalc_core::types::Rate;
    ///
    /// let baseline = Money::from_cents(499_900);
    /// let november = [Rate::from_bps(15_000), Rate::from_bps(7_000)];
    ///
    /// // 4999 × 1.5 × 0.7 = 5248.95 → 5249
    /// assert_eq!(baseline.scale_to_units(&november), Money::from_units(5249));
    /// ```
    pub fn scale_to_units(&self, factors: &[Rate]) -> Money {
        let mut numerator = self.0 as i128;
        let mut denominator = CENTS_PER_UNIT as i128;
        for factor in factors {
            numerator *= factor.bps() as i128;
            denominator *= Rate::BPS_PER_UNIT as i128;
        }
        let units = div_round_half_away(numerator, denominator);
        Money::from_units(units as i64)
    }
}

/// Integer division rounding half away from zero.
///
/// `denominator` must be positive.
pub(crate) fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The presentation layer owns localized
/// currency formatting.
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

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a whole count (months in a year).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

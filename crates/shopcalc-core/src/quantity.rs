//! # Quantity Module
//!
//! Exact decimal values for user-entered numbers: per-unit prices, monthly
//! budgets and order counts.
//!
//! ## Why not Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rounding a per-unit price to the cent before multiplying by the       │
//! │  order count moves the total:                                           │
//! │                                                                         │
//! │    0.125 → $0.13 × 1000 orders = $130.00   ✗                           │
//! │    0.125 × 1000 orders = $125.00           ✓                           │
//! │                                                                         │
//! │  Inputs keep six decimal places; only derived totals are rounded,      │
//! │  once, to the cent.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are parsed from the shortest decimal representation of the `f64`
//! the form widget produced, so `1.005` is 1.005 and not the binary
//! neighbour `1.00499999999999989...`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::money::{div_round_half_away, Money, CENTS_PER_UNIT};

/// Micro-units in one whole unit (six decimal places).
pub const MICROS_PER_UNIT: i64 = 1_000_000;

const FRACTION_DIGITS: usize = 6;

/// Why a raw number cannot become a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("value must be a finite number")]
    NotFinite,

    #[error("value must not be negative")]
    Negative,

    #[error("value is too large to represent")]
    TooLarge,
}

/// A non-negative decimal stored in micro-units (millionths).
///
/// Serialized as a plain JSON number (`49.99`), the way the form sends it.
/// Digits beyond the sixth decimal place are rounded half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(i64);

impl Quantity {
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Quantity(micros)
    }

    /// Creates a quantity from whole units (orders, dollars).
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * MICROS_PER_UNIT)
    }

    /// Creates a currency quantity from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Quantity(cents * (MICROS_PER_UNIT / CENTS_PER_UNIT))
    }

    #[inline]
    pub const fn from_money(money: Money) -> Self {
        Quantity::from_cents(money.cents())
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a user-entered number exactly.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::quantity::{Quantity, QuantityError};
    ///
    /// assert_eq!(Quantity::from_f64(10.5).unwrap().micros(), 10_500_000);
    /// assert_eq!(Quantity::from_f64(1.005).unwrap().micros(), 1_005_000);
    /// assert_eq!(Quantity::from_f64(f64::NAN), Err(QuantityError::NotFinite));
    /// assert_eq!(Quantity::from_f64(-0.5), Err(QuantityError::Negative));
    /// assert_eq!(Quantity::from_f64(1e300), Err(QuantityError::TooLarge));
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, QuantityError> {
        if !value.is_finite() {
            return Err(QuantityError::NotFinite);
        }
        if value < 0.0 {
            return Err(QuantityError::Negative);
        }
        if value == 0.0 {
            return Ok(Quantity::zero());
        }

        // f64 Display is the shortest round-trip decimal and never uses an exponent.
        let repr = value.to_string();
        let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        let mut micros: i128 = 0;
        let digits = whole
            .bytes()
            .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(FRACTION_DIGITS));
        for digit in digits {
            micros = micros
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or(QuantityError::TooLarge)?;
        }

        if fraction.as_bytes().get(FRACTION_DIGITS).is_some_and(|&d| d >= b'5') {
            micros += 1;
        }

        i64::try_from(micros)
            .map(Quantity)
            .map_err(|_| QuantityError::TooLarge)
    }

    /// Returns the value as the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }

    /// Rounds to the cent, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::from_micros(2_005_000).to_money().cents(), 201);
    /// assert_eq!(Quantity::from_micros(2_004_999).to_money().cents(), 200);
    /// ```
    pub fn to_money(&self) -> Money {
        let cents = div_round_half_away(
            i128::from(self.0),
            i128::from(MICROS_PER_UNIT / CENTS_PER_UNIT),
        );
        // |micros| / 10_000 always fits in i64.
        Money::from_cents(cents as i64)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Quantity::from_f64(value).map_err(serde::de::Error::custom)
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront service sends prices as JSON numbers: 4.5, 3.2 ...     │
//! │  Summing them as floats:                                                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ cart total drifts               │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the wire boundary to integer cents      │
//! │    4.5 → 450 cents, then all cart math is exact integer math           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewcart_core::money::Money;
//!
//! let price = Money::from_cents(450); // $4.50
//! let line = price * 3;               // $13.50
//! let total = line + Money::from_cents(320);
//! assert_eq!(total.cents(), 1670);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::error::ValidationError;
use crate::MAX_UNIT_PRICE_CENTS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price (frozen at add) ──► line total
///                                                              │
///                                     CartLedger.total ◄───────┘ (Σ)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use brewcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal price from the wire into cents.
    ///
    /// This is the only place a float becomes money. The value is rounded to
    /// the nearest cent. Negative, non-finite and values above
    /// [`MAX_UNIT_PRICE_CENTS`] are rejected.
    ///
    /// ```rust
    /// use brewcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(4.5).unwrap().cents(), 450);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(-1.0).is_err());
    /// ```
    pub fn from_decimal(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }
        let cents = (value * 100.0).round();
        if cents > MAX_UNIT_PRICE_CENTS as f64 {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_UNIT_PRICE_CENTS,
            });
        }
        Ok(Money(cents as i64))
    }

    /// Returns the value as a decimal number of major units (for the wire).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
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

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use brewcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display ("$4.50"). Screens format through the store config.
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

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

// =============================================================================
// Wire Representation
// =============================================================================

/// Serde adapter for prices that travel as decimal JSON numbers.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
pub mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(de::Error::custom)
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
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut acc = Money::zero();
        acc += b;
        acc += b;
        assert_eq!(acc, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [450, 320, 230]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 1000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(4.5).unwrap().cents(), 450);
        assert_eq!(Money::from_decimal(3.199).unwrap().cents(), 320);
        assert_eq!(Money::from_decimal(0.0).unwrap().cents(), 0);
        // Classic float artefact collapses to an exact cent value
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    }

    #[test]
    fn test_from_decimal_rejects_bad_values() {
        assert!(matches!(
            Money::from_decimal(-0.5),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            Money::from_decimal(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Money::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_decimal_bounds_unit_price() {
        let max = MAX_UNIT_PRICE_CENTS as f64 / 100.0;
        assert_eq!(
            Money::from_decimal(max).unwrap().cents(),
            MAX_UNIT_PRICE_CENTS
        );
        assert!(matches!(
            Money::from_decimal(max + 0.01),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Money::from_decimal(5e16),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_decimal_serde_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "super::decimal")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 4.25}"#).unwrap();
        assert_eq!(parsed.price.cents(), 425);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"price":4.25}"#);

        assert!(serde_json::from_str::<Priced>(r#"{"price": -2}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": 50000000000000000}"#).is_err());
    }
}

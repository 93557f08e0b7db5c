//! Fixed-point decimal types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors),
//! so instrument and cash conservation can be checked with exact equality.
//!
//! - `Price` is strictly positive.
//! - `Quantity` is non-negative. Zero only appears transiently while
//!   matching; resting orders always carry a positive quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Numeric parsing/validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("not a decimal number: {0}")]
    Malformed(String),

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("quantity must not be negative, got {0}")]
    NegativeQuantity(Decimal),

    #[error("{0} exceeds the decimal range")]
    Overflow(&'static str),
}

/// Limit price of an order, always > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a price, returning None unless strictly positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// # Panics
    /// Panics on zero
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = NumericError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(NumericError::NonPositivePrice(value))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| NumericError::Malformed(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 100.00 and 100 are the same level; render without trailing zeros
        write!(f, "{}", self.0.normalize())
    }
}

/// Order or fill quantity, always >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create a quantity, returning None if negative
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add, returning None on overflow
    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract, returning None if the result would be negative
    pub fn checked_sub(self, other: Quantity) -> Option<Quantity> {
        Self::try_new(self.0.checked_sub(other.0)?)
    }

    /// Cash value of this quantity at the given price, None on overflow
    pub fn notional(&self, price: Price) -> Option<Decimal> {
        self.0.checked_mul(price.as_decimal())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = NumericError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(NumericError::NegativeQuantity(value))
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| NumericError::Malformed(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_must_be_positive() {
        assert!(Price::try_new(Decimal::ONE).is_some());
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::NEGATIVE_ONE).is_none());
        assert_eq!(
            Price::from_str("0"),
            Err(NumericError::NonPositivePrice(Decimal::ZERO))
        );
    }

    #[test]
    #[should_panic(expected = "Price must be positive")]
    fn test_price_from_zero_panics() {
        Price::from_u64(0);
    }

    #[test]
    fn test_price_display_is_normalized() {
        let price = Price::from_str("100.500").unwrap();
        assert_eq!(price.to_string(), "100.5");
        assert_eq!(Price::from_str("100.00").unwrap(), Price::from_u64(100));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(Quantity::from_str("ten"), Err(NumericError::Malformed(_))));
    }

    #[test]
    fn test_quantity_checked_sub() {
        let five = Quantity::from_u64(5);
        let three = Quantity::from_u64(3);

        assert_eq!(five.checked_sub(three), Some(Quantity::from_u64(2)));
        assert_eq!(three.checked_sub(five), None);
        assert!(five.checked_sub(five).unwrap().is_zero());
    }

    #[test]
    fn test_quantity_notional() {
        let qty = Quantity::from_str("2.5").unwrap();
        assert_eq!(qty.notional(Price::from_u64(100)), Some(Decimal::from(250)));
    }

    #[test]
    fn test_arithmetic_at_decimal_max() {
        let max = Quantity::try_new(Decimal::MAX).unwrap();
        let top = Price::try_new(Decimal::MAX).unwrap();

        assert_eq!(max.checked_add(Quantity::from_u64(1)), None);
        assert_eq!(Quantity::from_u64(2).notional(top), None);
        assert_eq!(Quantity::from_u64(1).notional(top), Some(Decimal::MAX));
        assert_eq!(max.checked_add(Quantity::zero()), Some(max));
    }

    #[test]
    fn test_deserialize_rejects_non_positive_price() {
        assert!(serde_json::from_str::<Price>("0").is_err());
        assert!(serde_json::from_str::<Price>("-3").is_err());
        assert_eq!(serde_json::from_str::<Price>("50").unwrap(), Price::from_u64(50));
        assert_eq!(serde_json::from_str::<Price>("\"50\"").unwrap(), Price::from_u64(50));
    }
}

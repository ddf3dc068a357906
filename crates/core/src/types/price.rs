//! Type-safe unit price using decimal arithmetic.
//!
//! The cart never performs currency conversion. A price is an opaque amount
//! that is only multiplied by a quantity when a summary is derived. All
//! arithmetic is checked, since a `Decimal` product can exceed its range.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quantity;

/// Unit price of a catalog product.
///
/// Serialized as a plain JSON number (e.g. `19.99`) so snapshots stay
/// compatible with stores written by other clients. The number is written
/// with every digit of the decimal, never through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, or `None` if it exceeds the decimal range.
    #[must_use]
    pub fn line_total(&self, quantity: Quantity) -> Option<Decimal> {
        self.0.checked_mul(Decimal::from(quantity.get()))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::new(dec!(19.99));
        assert_eq!(serde_json::to_string(&price).unwrap(), "19.99");
    }

    #[test]
    fn test_price_deserializes_integers_and_floats() {
        let whole: Price = serde_json::from_str("10").unwrap();
        assert_eq!(whole.amount(), dec!(10));

        let fractional: Price = serde_json::from_str("4.5").unwrap();
        assert_eq!(fractional.amount(), dec!(4.5));
    }

    #[test]
    fn test_price_line_total() {
        let price = Price::new(dec!(2.50));
        let quantity = Quantity::new(3).unwrap();
        assert_eq!(price.line_total(quantity), Some(dec!(7.50)));
    }

    #[test]
    fn test_price_line_total_overflow() {
        let price = Price::new(dec!(50000000000000000000000000000));
        let quantity = Quantity::new(2).unwrap();
        assert_eq!(price.line_total(quantity), None);
    }

    #[test]
    fn test_price_keeps_full_precision_in_json() {
        let price: Price = "0.1234567890123456789".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "0.1234567890123456789");

        let restored: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, price);
    }

    #[test]
    fn test_price_from_str_and_display() {
        let price: Price = " 12.5 ".parse().unwrap();
        assert_eq!(price.to_string(), "12.50");
        assert!("twelve".parse::<Price>().is_err());
    }
}

//! Order types
//!
//! A limit order is an owner, a limit price and a quantity. The side is
//! carried alongside while an order is in flight and becomes implicit once
//! it rests in the bid or ask book.

use crate::ids::{OrderId, UserId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bid" => Ok(Side::Bid),
            "ask" => Ok(Side::Ask),
            other => Err(format!("Invalid side '{}'. Use 'bid' or 'ask'.", other)),
        }
    }
}

/// A resting limit order
///
/// `quantity` is what is still open; it is decremented in place on partial
/// fills and the order is dropped from the book when it reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    /// Create a new order with a fresh id
    pub fn new(user_id: UserId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id: OrderId::new(),
            user_id,
            price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("bid".parse::<Side>(), Ok(Side::Bid));
        assert_eq!("ask".parse::<Side>(), Ok(Side::Ask));
        assert!("BUY".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Bid).unwrap(), "\"bid\"");
        assert_eq!(serde_json::from_str::<Side>("\"ask\"").unwrap(), Side::Ask);
    }

    #[test]
    fn test_order_creation() {
        let order = Order::new(UserId::new("1"), Price::from_u64(50), Quantity::from_u64(10));
        assert_eq!(order.user_id.as_str(), "1");
        assert_eq!(order.quantity, Quantity::from_u64(10));
    }
}

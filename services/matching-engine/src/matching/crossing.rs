//! Crossing detection logic
//!
//! Determines when an incoming order can trade against a resting one

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// Buy price must be >= sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against a resting order
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Bid => can_match(incoming_price, resting_price),
        Side::Ask => can_match(resting_price, incoming_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        assert!(can_match(Price::from_u64(101), Price::from_u64(99)), "Bid >= ask should match");
    }

    #[test]
    fn test_can_match_exact() {
        let price = Price::from_u64(100);
        assert!(can_match(price, price), "Equal prices should match");
    }

    #[test]
    fn test_can_match_no_cross() {
        assert!(!can_match(Price::from_u64(99), Price::from_u64(100)), "Bid < ask should not match");
    }

    #[test]
    fn test_incoming_bid_skips_expensive_ask() {
        assert!(incoming_can_match(Side::Bid, Price::from_u64(100), Price::from_u64(99)));
        assert!(!incoming_can_match(Side::Bid, Price::from_u64(100), Price::from_u64(101)));
    }

    #[test]
    fn test_incoming_ask_skips_cheap_bid() {
        assert!(incoming_can_match(Side::Ask, Price::from_u64(100), Price::from_u64(101)));
        assert!(!incoming_can_match(Side::Ask, Price::from_u64(100), Price::from_u64(99)));
    }
}

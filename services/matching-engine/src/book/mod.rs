//! Order book infrastructure module
//!
//! Contains price levels, bid book, ask book and the two-sided book that the
//! engine owns.

pub mod price_level;
pub mod bid_book;
pub mod ask_book;

pub use price_level::{OrderEntry, PriceLevel};
pub use bid_book::BidBook;
pub use ask_book::AskBook;

use types::errors::ExchangeError;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Resting bids and asks for the single instrument
///
/// Invariant: every queued order has a strictly positive quantity and no
/// empty price level is kept.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest an order on the given side without matching it
    pub fn insert(&mut self, side: Side, order: &Order) -> Result<(), ExchangeError> {
        match side {
            Side::Bid => self.bids.insert(order),
            Side::Ask => self.asks.insert(order),
        }
    }

    /// Check that `quantity` more can rest at `price` on `side`
    pub fn check_room(&self, side: Side, price: Price, quantity: Quantity) -> Result<(), ExchangeError> {
        match side {
            Side::Bid => self.bids.check_room(price, quantity),
            Side::Ask => self.asks.check_room(price, quantity),
        }
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Resting orders of one side; the next order to match is last
    pub fn orders(&self, side: Side) -> Vec<Order> {
        match side {
            Side::Bid => self.bids.orders(),
            Side::Ask => self.asks.orders(),
        }
    }

    pub fn order_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::UserId;

    #[test]
    fn test_insert_routes_by_side() {
        let mut book = OrderBook::new();
        let order = Order::new(UserId::new("1"), Price::from_u64(50), Quantity::from_u64(10));

        book.insert(Side::Bid, &order).unwrap();
        assert_eq!(book.orders(Side::Bid), vec![order]);
        assert!(book.orders(Side::Ask).is_empty());
        assert_eq!(book.order_count(), 1);
        assert!(!book.is_empty());
    }
}

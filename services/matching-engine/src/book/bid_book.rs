//! Bid (buy-side) order book
//!
//! Keeps buy orders in price levels keyed by a BTreeMap; the best bid is the
//! highest key. Within a level, orders are FIFO.

use std::collections::BTreeMap;
use types::errors::ExchangeError;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
#[derive(Debug, Clone)]
pub struct BidBook {
    /// BTreeMap iter is ascending, so the best bid is at the back
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the bid book
    pub fn insert(&mut self, order: &Order) -> Result<(), ExchangeError> {
        if order.quantity.is_zero() {
            return Ok(());
        }
        self.check_room(order.price, order.quantity)?;
        let level = self.levels.entry(order.price).or_insert_with(PriceLevel::new);
        level.insert(order)
    }

    /// Check that `quantity` more can rest at `price`
    pub fn check_room(&self, price: Price, quantity: Quantity) -> Result<(), ExchangeError> {
        match self.levels.get(&price) {
            Some(level) => level.room_for(quantity).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get mutable reference to the best bid level
    pub(crate) fn best_bid_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels.iter_mut().next_back().map(|(price, level)| (*price, level))
    }

    /// Drop a level once matching has emptied it
    pub(crate) fn prune_level(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    /// Price levels, best (highest) first
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Resting orders ascending by price, so the next order to match is last
    pub fn orders(&self) -> Vec<Order> {
        self.levels
            .iter()
            .flat_map(|(price, level)| level.iter().rev().map(move |entry| entry.to_order(*price)))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}

impl Default for BidBook {
    fn default() -> Self {
        Self::new()
    }
}

//! Aggregated book depth
//!
//! One entry per distinct resting price with the summed open quantity of
//! that price level. Bids are listed first, then asks; an ask level at a
//! price that also holds bids replaces the bid entry instead of merging.

use serde::Serialize;
use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Side;

use crate::book::OrderBook;

/// Aggregate for one price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthLevel {
    #[serde(rename = "type")]
    pub side: Side,
    pub quantity: Quantity,
}

/// Price -> aggregate, ascending by price
pub type Depth = BTreeMap<Price, DepthLevel>;

/// Build the depth view; never mutates the book
pub fn aggregate(book: &OrderBook) -> Depth {
    let mut depth = Depth::new();

    // A level already carries its summed quantity
    let bids = book.bids().levels().map(|(price, level)| (price, Side::Bid, level));
    let asks = book.asks().levels().map(|(price, level)| (price, Side::Ask, level));
    for (price, side, level) in bids.chain(asks) {
        depth.insert(price, DepthLevel { side, quantity: level.total_quantity() });
    }

    depth
}

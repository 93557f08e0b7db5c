//! Trade execution and settlement types
//!
//! A trade is produced for every maker touched by an incoming order. It lives
//! only long enough to drive the balance transfer and to be logged; the
//! exchange keeps no trade history.

use crate::ids::{OrderId, UserId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use serde::{Deserialize, Serialize};

/// Trade settlement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeState {
    /// Trade created, pending settlement
    Matched,
    /// Both balance legs applied (terminal)
    Settled,
    /// Neither balance leg applied (terminal)
    Failed,
}

/// Single maker/taker execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Engine-local monotonic sequence
    pub sequence: u64,

    pub maker_order_id: OrderId,
    pub maker: UserId,
    pub taker: UserId,

    /// Side of the incoming order
    pub taker_side: Side,
    /// Always the maker's resting price
    pub price: Price,
    pub quantity: Quantity,

    pub state: TradeState,
}

impl Trade {
    /// Create a new matched trade
    pub fn new(
        sequence: u64,
        maker_order_id: OrderId,
        maker: UserId,
        taker: UserId,
        taker_side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            sequence,
            maker_order_id,
            maker,
            taker,
            taker_side,
            price,
            quantity,
            state: TradeState::Matched,
        }
    }

    /// User giving up the instrument
    pub fn seller(&self) -> &UserId {
        match self.taker_side {
            Side::Bid => &self.maker,
            Side::Ask => &self.taker,
        }
    }

    /// User receiving the instrument
    pub fn buyer(&self) -> &UserId {
        match self.taker_side {
            Side::Bid => &self.taker,
            Side::Ask => &self.maker,
        }
    }

    pub fn settle(&mut self) {
        self.state = TradeState::Settled;
    }

    pub fn fail(&mut self) {
        self.state = TradeState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trade(taker_side: Side) -> Trade {
        Trade::new(
            7,
            OrderId::new(),
            UserId::new("maker"),
            UserId::new("taker"),
            taker_side,
            Price::from_u64(100),
            Quantity::from_u64(3),
        )
    }

    #[test]
    fn test_trade_creation() {
        let trade = make_trade(Side::Bid);
        assert_eq!(trade.state, TradeState::Matched);
    }

    #[test]
    fn test_counterparties_follow_taker_side() {
        let bid_taker = make_trade(Side::Bid);
        assert_eq!(bid_taker.seller().as_str(), "maker");
        assert_eq!(bid_taker.buyer().as_str(), "taker");

        let ask_taker = make_trade(Side::Ask);
        assert_eq!(ask_taker.seller().as_str(), "taker");
        assert_eq!(ask_taker.buyer().as_str(), "maker");
    }

    #[test]
    fn test_trade_state_transitions() {
        let mut trade = make_trade(Side::Ask);
        trade.settle();
        assert_eq!(trade.state, TradeState::Settled);

        let mut failed = make_trade(Side::Ask);
        failed.fail();
        assert_eq!(failed.state, TradeState::Failed);
    }
}

//! Trade execution logic
//!
//! Turns a maker/taker crossing into a sequenced `Trade`

use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

/// Match executor for handling trade generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Execute a trade between a resting maker and the incoming taker
    ///
    /// `price` must be the maker's resting price.
    pub fn execute_trade(
        &mut self,
        maker_order_id: OrderId,
        maker: UserId,
        taker: UserId,
        taker_side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Trade {
        let sequence = self.next_sequence();
        Trade::new(sequence, maker_order_id, maker, taker, taker_side, price, quantity)
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(1)
    }
}

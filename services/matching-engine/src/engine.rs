//! Matching engine core
//!
//! Owns the order book, the balance ledger and the trade sequencer. Every
//! mutation goes through `&mut self`, so whoever holds the engine holds the
//! whole match-settle-rest sequence as one unit.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use types::account::{Account, Balances};
use types::errors::ExchangeError;
use types::ids::UserId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{OrderBook, PriceLevel};
use crate::depth::{self, Depth};
use crate::ledger::BalanceLedger;
use crate::matching::{crossing, MatchExecutor};
use crate::quote;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    /// Traded instrument symbol
    pub instrument: String,
    /// Cash asset symbol
    pub cash: String,
    /// First trade sequence number
    pub starting_sequence: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            instrument: "GOOGLE".to_string(),
            cash: "USD".to_string(),
            starting_sequence: 1,
        }
    }
}

/// Result of one matching walk
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Unfilled part of the incoming order
    pub remaining: Quantity,
    /// Trades in execution order
    pub trades: Vec<Trade>,
}

/// Result of placing a limit order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub filled_quantity: Quantity,
    /// Residual left on the book, if any
    pub resting_order: Option<Order>,
    pub trades: Vec<Trade>,
}

/// One maker fill an incoming order will take
#[derive(Debug, Clone, PartialEq)]
struct PlannedFill {
    maker: UserId,
    price: Price,
    quantity: Quantity,
}

/// Single-instrument matching engine
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    book: OrderBook,
    ledger: BalanceLedger,
    executor: MatchExecutor,
}

impl MatchingEngine {
    /// Create an engine with an empty book and no users
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            book: OrderBook::new(),
            ledger: BalanceLedger::new(config.instrument.clone(), config.cash.clone()),
            executor: MatchExecutor::new(config.starting_sequence),
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Register a user and its opening balances
    pub fn provision(&mut self, account: Account) {
        info!(user_id = %account.user_id, "Provisioned account");
        self.ledger.provision(account);
    }

    /// Place a limit order: match, then rest any residual on the book
    ///
    /// Every fill and the residual are checked before anything is written,
    /// so a rejected order leaves book and ledger exactly as they were.
    pub fn place_order(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        user_id: &UserId,
    ) -> Result<OrderReceipt, ExchangeError> {
        if quantity.is_zero() {
            return Err(ExchangeError::InvalidParameters("quantity must be positive".to_string()));
        }
        if !self.ledger.contains(user_id) {
            return Err(ExchangeError::UnknownUser { user_id: user_id.to_string() });
        }

        info!(%side, %price, %quantity, %user_id, "Order received");

        let (fills, residual) = self.plan_fills(side, price, quantity);
        self.check_settlement(side, user_id, &fills)?;
        if !residual.is_zero() {
            self.book.check_room(side, price, residual)?;
        }

        let outcome = self.execute_fills(side, quantity, user_id, fills);
        let filled_quantity = quantity.checked_sub(outcome.remaining).unwrap_or(Quantity::zero());

        let resting_order = if outcome.remaining.is_zero() {
            None
        } else {
            let order = Order::new(user_id.clone(), price, outcome.remaining);
            self.book.insert(side, &order)?;
            debug!(order_id = %order.order_id, %side, %price, remaining = %order.quantity, "Residual rested");
            Some(order)
        };

        Ok(OrderReceipt {
            filled_quantity,
            resting_order,
            trades: outcome.trades,
        })
    }

    /// Cross an incoming order against the opposite side
    ///
    /// Walks makers best price first, oldest first within a price, settling
    /// each fill at the maker's price. Stops at the first ineligible price or
    /// when the incoming quantity is exhausted. Does not rest the remainder.
    /// Fails without touching the book if any fill could not be settled.
    pub fn fill_orders(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        user_id: &UserId,
    ) -> Result<MatchOutcome, ExchangeError> {
        let (fills, _) = self.plan_fills(side, price, quantity);
        self.check_settlement(side, user_id, &fills)?;
        Ok(self.execute_fills(side, quantity, user_id, fills))
    }

    /// Fills the incoming order would take, and what it would leave over
    fn plan_fills(&self, side: Side, price: Price, quantity: Quantity) -> (Vec<PlannedFill>, Quantity) {
        match side.opposite() {
            Side::Ask => plan(self.book.asks().levels(), side, price, quantity),
            Side::Bid => plan(self.book.bids().levels(), side, price, quantity),
        }
    }

    fn check_settlement(&self, side: Side, taker: &UserId, fills: &[PlannedFill]) -> Result<(), ExchangeError> {
        self.ledger.check_transfers(fills.iter().map(|fill| {
            let (seller, buyer) = match side {
                Side::Bid => (&fill.maker, taker),
                Side::Ask => (taker, &fill.maker),
            };
            (seller, buyer, fill.quantity, fill.price)
        }))
    }

    /// Apply planned fills to the book and the ledger
    fn execute_fills(
        &mut self,
        side: Side,
        quantity: Quantity,
        user_id: &UserId,
        fills: Vec<PlannedFill>,
    ) -> MatchOutcome {
        let mut remaining = quantity;
        let mut trades = Vec::with_capacity(fills.len());

        for fill in fills {
            let best = match side.opposite() {
                Side::Ask => self.book.asks.best_ask_level_mut(),
                Side::Bid => self.book.bids.best_bid_level_mut(),
            };
            let Some((maker_price, level)) = best else {
                break;
            };
            let Some(maker) = level.fill_front(fill.quantity) else {
                break;
            };
            let level_drained = level.is_empty();

            let mut trade = self.executor.execute_trade(
                maker.order_id,
                maker.user_id,
                user_id.clone(),
                side,
                maker_price,
                fill.quantity,
            );
            self.settle(&mut trade);
            trades.push(trade);

            if level_drained {
                match side.opposite() {
                    Side::Ask => self.book.asks.prune_level(maker_price),
                    Side::Bid => self.book.bids.prune_level(maker_price),
                }
            }

            remaining = remaining.checked_sub(fill.quantity).unwrap_or(Quantity::zero());
        }

        MatchOutcome { remaining, trades }
    }

    fn settle(&mut self, trade: &mut Trade) {
        match self.ledger.settle(trade) {
            Ok(()) => debug!(
                sequence = trade.sequence,
                maker_order_id = %trade.maker_order_id,
                seller = %trade.seller(),
                buyer = %trade.buyer(),
                price = %trade.price,
                quantity = %trade.quantity,
                "Trade settled"
            ),
            // The book fill stands even when settlement is refused
            Err(err) => warn!(sequence = trade.sequence, error = %err, "Trade not settled"),
        }
    }

    /// Aggregated depth of both sides
    pub fn depth(&self) -> Depth {
        depth::aggregate(&self.book)
    }

    /// Balances of a user, zero-valued if unknown
    pub fn balances(&self, user_id: &str) -> Balances {
        self.ledger.balances_of(user_id)
    }

    /// Estimated cost of trading `quantity` on `side` against the book
    pub fn quote(&self, side: Side, quantity: Quantity) -> Result<Decimal, ExchangeError> {
        quote::estimate(&self.book, side, quantity)
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(ExchangeConfig::default())
    }
}

/// Walk makers best price first, oldest first, without touching them
///
/// Levels are price-sorted, so nothing past an ineligible level can cross.
fn plan<'a>(
    levels: impl Iterator<Item = (Price, &'a PriceLevel)>,
    side: Side,
    price: Price,
    quantity: Quantity,
) -> (Vec<PlannedFill>, Quantity) {
    let mut fills = Vec::new();
    let mut remaining = quantity;

    for (maker_price, level) in levels {
        if remaining.is_zero() || !crossing::incoming_can_match(side, price, maker_price) {
            break;
        }
        for maker in level.iter() {
            let fill = remaining.min(maker.quantity);
            fills.push(PlannedFill {
                maker: maker.user_id.clone(),
                price: maker_price,
                quantity: fill,
            });
            remaining = remaining.checked_sub(fill).unwrap_or(Quantity::zero());
            if remaining.is_zero() {
                break;
            }
        }
    }

    (fills, remaining)
}

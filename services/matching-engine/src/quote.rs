//! Quote estimator
//!
//! Prices a hypothetical order by walking the opposite side best-first with
//! no limit price. Read-only over the book; the ledger is never consulted.

use rust_decimal::Decimal;
use types::errors::ExchangeError;
use types::numeric::{NumericError, Price, Quantity};
use types::order::Side;

use crate::book::{OrderBook, PriceLevel};

/// Estimated cash cost (bid) or proceeds (ask) for `quantity`
pub fn estimate(book: &OrderBook, side: Side, quantity: Quantity) -> Result<Decimal, ExchangeError> {
    if quantity.is_zero() {
        return Err(ExchangeError::InvalidParameters("quantity must be positive".to_string()));
    }

    match side.opposite() {
        Side::Ask => walk(book.asks().levels(), quantity),
        Side::Bid => walk(book.bids().levels(), quantity),
    }
}

fn walk<'a>(
    levels: impl Iterator<Item = (Price, &'a PriceLevel)>,
    quantity: Quantity,
) -> Result<Decimal, ExchangeError> {
    let mut cost = Decimal::ZERO;
    let mut remaining = quantity;

    for (price, level) in levels {
        let take = remaining.min(level.total_quantity());
        let value = take.notional(price).ok_or(NumericError::Overflow("quote"))?;
        cost = cost.checked_add(value).ok_or(NumericError::Overflow("quote"))?;
        remaining = remaining.checked_sub(take).unwrap_or(Quantity::zero());

        if remaining.is_zero() {
            return Ok(cost);
        }
    }

    // Every level was taken whole, so what was taken is all there is
    let available = quantity.checked_sub(remaining).unwrap_or(Quantity::zero());
    Err(ExchangeError::InsufficientLiquidity {
        requested: quantity.to_string(),
        available: available.to_string(),
    })
}

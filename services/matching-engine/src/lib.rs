//! Matching Engine Service
//!
//! Single-instrument limit order matching with an attached balance ledger.
//!
//! **Key Invariants:**
//! - Price priority: highest bid and lowest ask match first, oldest first
//!   within a price
//! - Trades settle at the resting (maker) price
//! - Every settled trade moves instrument and cash together, so both
//!   totals are conserved
//! - No zero-quantity order ever rests on the book

pub mod book;
pub mod matching;
pub mod ledger;
pub mod depth;
pub mod quote;
pub mod engine;

pub use depth::{Depth, DepthLevel};
pub use engine::{ExchangeConfig, MatchOutcome, MatchingEngine, OrderReceipt};
pub use ledger::BalanceLedger;

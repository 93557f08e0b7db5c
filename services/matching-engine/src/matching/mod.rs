//! Matching logic module
//!
//! Price priority crossing and trade generation

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, incoming_can_match};
pub use executor::MatchExecutor;

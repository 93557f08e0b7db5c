//! Types library for the exchange
//!
//! Core type definitions shared by the matching engine and the gateway.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, UserId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Side and resting order
//! - `trade`: Trade execution types
//! - `account`: Account and balance types
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod account;
pub mod errors;

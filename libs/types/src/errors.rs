//! Error types for the exchange
//!
//! Flat taxonomy using thiserror. None of these are fatal and none are
//! retried; every operation is an in-memory computation.

use crate::numeric::NumericError;
use thiserror::Error;

/// Top-level exchange error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    /// Missing or malformed side, price, quantity or user identifier
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// User was never provisioned
    #[error("Unknown user: {user_id}")]
    UnknownUser { user_id: String },

    /// The opposite side cannot cover the requested quantity
    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: String, available: String },
}

impl From<NumericError> for ExchangeError {
    fn from(err: NumericError) -> Self {
        ExchangeError::InvalidParameters(err.to_string())
    }
}

//! Account and balance types
//!
//! Balances are signed: there is no overdraft protection, so a user may go
//! negative in either the instrument or the cash asset.

use crate::ids::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asset symbol -> signed amount
///
/// BTreeMap keeps serialized output in a stable order.
pub type Balances = BTreeMap<String, Decimal>;

/// Balance mapping with every listed asset set to zero
pub fn zero_balances<'a>(assets: impl IntoIterator<Item = &'a str>) -> Balances {
    assets
        .into_iter()
        .map(|asset| (asset.to_string(), Decimal::ZERO))
        .collect()
}

/// A provisioned user and its balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub balances: Balances,
}

impl Account {
    /// Create an account with no balances
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            balances: Balances::new(),
        }
    }

    /// Builder-style initial balance
    pub fn with_balance(mut self, asset: impl Into<String>, amount: Decimal) -> Self {
        self.balances.insert(asset.into(), amount);
        self
    }

    /// Balance for an asset, zero if never touched
    pub fn balance(&self, asset: &str) -> Decimal {
        self.balances.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set_balance(&mut self, asset: &str, amount: Decimal) {
        self.balances.insert(asset.to_string(), amount);
    }
}

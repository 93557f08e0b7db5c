//! Balance ledger
//!
//! Per-user balances for the instrument and the cash asset. A settlement
//! touches two users and four balances; either all four change or none do.
//! There is no overdraft check.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::account::{zero_balances, Account, Balances};
use types::errors::ExchangeError;
use types::ids::UserId;
use types::numeric::{NumericError, Price, Quantity};
use types::trade::Trade;

/// Post-transfer balances keyed by user and asset
type Staged = HashMap<(UserId, String), Decimal>;

/// Balance store keyed by user, then asset symbol
#[derive(Debug, Clone)]
pub struct BalanceLedger {
    instrument: String,
    cash: String,
    accounts: HashMap<UserId, Account>,
}

impl BalanceLedger {
    pub fn new(instrument: impl Into<String>, cash: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            cash: cash.into(),
            accounts: HashMap::new(),
        }
    }

    /// Register a user with its opening balances
    ///
    /// Re-provisioning an existing user replaces its balances.
    pub fn provision(&mut self, account: Account) {
        self.accounts.insert(account.user_id.clone(), account);
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.accounts.contains_key(user_id)
    }

    pub fn user_count(&self) -> usize {
        self.accounts.len()
    }

    /// Full balance mapping of a user
    ///
    /// Unknown users read as zero instrument and zero cash.
    pub fn balances_of(&self, user_id: &str) -> Balances {
        match self.accounts.get(user_id) {
            Some(account) => account.balances.clone(),
            None => zero_balances([self.instrument.as_str(), self.cash.as_str()]),
        }
    }

    /// Move `quantity` instrument from seller to buyer and
    /// `quantity * price` cash from buyer to seller
    ///
    /// All four balances are computed before anything is written, so an
    /// unknown party or an overflowing amount leaves every balance untouched.
    pub fn transfer(
        &mut self,
        seller: &UserId,
        buyer: &UserId,
        quantity: Quantity,
        price: Price,
    ) -> Result<(), ExchangeError> {
        let mut staged = Staged::new();
        self.stage(&mut staged, seller, buyer, quantity, price)?;

        for ((user_id, asset), amount) in staged {
            if let Some(account) = self.accounts.get_mut(&user_id) {
                account.set_balance(&asset, amount);
            }
        }
        Ok(())
    }

    /// Check that a batch of transfers would all apply, in order
    ///
    /// Nothing is written.
    pub fn check_transfers<'a>(
        &self,
        transfers: impl IntoIterator<Item = (&'a UserId, &'a UserId, Quantity, Price)>,
    ) -> Result<(), ExchangeError> {
        let mut staged = Staged::new();
        for (seller, buyer, quantity, price) in transfers {
            self.stage(&mut staged, seller, buyer, quantity, price)?;
        }
        Ok(())
    }

    fn stage(
        &self,
        staged: &mut Staged,
        seller: &UserId,
        buyer: &UserId,
        quantity: Quantity,
        price: Price,
    ) -> Result<(), ExchangeError> {
        for user in [seller, buyer] {
            if !self.contains(user) {
                return Err(ExchangeError::UnknownUser { user_id: user.to_string() });
            }
        }

        let units = quantity.as_decimal();
        let value = quantity.notional(price).ok_or(NumericError::Overflow("trade value"))?;
        let legs = [
            (seller, &self.instrument, -units),
            (seller, &self.cash, value),
            (buyer, &self.instrument, units),
            (buyer, &self.cash, -value),
        ];

        // Keyed by user, so a self-match nets out on one account
        for (user_id, asset, delta) in legs {
            let key = (user_id.clone(), asset.clone());
            let current = match staged.get(&key) {
                Some(amount) => *amount,
                None => self.accounts.get(user_id).map_or(Decimal::ZERO, |account| account.balance(asset)),
            };
            let next = current.checked_add(delta).ok_or(NumericError::Overflow("balance"))?;
            staged.insert(key, next);
        }
        Ok(())
    }

    /// Apply a trade and record the outcome on it
    pub fn settle(&mut self, trade: &mut Trade) -> Result<(), ExchangeError> {
        let result = self.transfer(trade.seller(), trade.buyer(), trade.quantity, trade.price);
        match result {
            Ok(()) => trade.settle(),
            Err(_) => trade.fail(),
        }
        result
    }

    /// Sum of one asset over every account
    pub fn total(&self, asset: &str) -> Decimal {
        self.accounts.values().map(|account| account.balance(asset)).sum()
    }
}

use crate::config::GatewayConfig;
use matching_engine::{ExchangeConfig, MatchingEngine};
use std::sync::Arc;
use tokio::sync::RwLock;
use types::account::Account;
use types::ids::UserId;

/// Shared handler state
///
/// One lock guards book and ledger together. Order placement holds the write
/// guard across match, settlement and residual insertion.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<MatchingEngine>>,
}

impl AppState {
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Build an engine and provision the configured seed accounts
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let mut engine = MatchingEngine::new(ExchangeConfig {
            instrument: config.instrument.clone(),
            cash: config.cash.clone(),
            ..ExchangeConfig::default()
        });

        for seed in &config.accounts {
            let user_id = UserId::try_new(seed.user_id.clone())
                .ok_or_else(|| anyhow::anyhow!("seed account with blank user_id"))?;
            let account = seed
                .balances
                .iter()
                .fold(Account::new(user_id), |account, (asset, amount)| {
                    account.with_balance(asset.clone(), *amount)
                });
            engine.provision(account);
        }

        Ok(Self::new(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedAccount;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_seed_accounts_provisioned() {
        let state = AppState::from_config(&GatewayConfig::default()).unwrap();
        let engine = state.engine.read().await;

        assert_eq!(engine.ledger().user_count(), 2);
        assert_eq!(engine.balances("1")["GOOGLE"], Decimal::from(10));
        assert_eq!(engine.balances("2")["USD"], Decimal::from(50000));
    }

    #[test]
    fn test_blank_seed_user_rejected() {
        let config = GatewayConfig {
            accounts: vec![SeedAccount { user_id: " ".to_string(), balances: Default::default() }],
            ..GatewayConfig::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}

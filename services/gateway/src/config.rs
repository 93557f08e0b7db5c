use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Command line for the gateway binary
#[derive(Debug, Parser)]
#[command(name = "gateway", about = "HTTP gateway for the single-instrument exchange")]
pub struct Cli {
    /// TOML file with listen address, assets and seed accounts
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides `listen_addr` from the config file
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}

/// Account provisioned at startup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedAccount {
    pub user_id: String,
    #[serde(default)]
    pub balances: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub instrument: String,
    pub cash: String,
    pub accounts: Vec<SeedAccount>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let seed = |id: &str| SeedAccount {
            user_id: id.to_string(),
            balances: BTreeMap::from([
                ("GOOGLE".to_string(), Decimal::from(10)),
                ("USD".to_string(), Decimal::from(50000)),
            ]),
        };

        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            instrument: "GOOGLE".to_string(),
            cash: "USD".to_string(),
            accounts: vec![seed("1"), seed("2")],
        }
    }
}

impl GatewayConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = Self::load(cli.config.as_deref())?;
        if let Some(listen) = cli.listen {
            config.listen_addr = listen;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seeds_two_users() {
        let config = GatewayConfig::default();
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].balances["GOOGLE"], Decimal::from(10));
        assert_eq!(config.accounts[1].balances["USD"], Decimal::from(50000));
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GatewayConfig::from_toml_str(r#"listen_addr = "127.0.0.1:9000""#).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.instrument, "GOOGLE");
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn test_toml_accounts() {
        let config = GatewayConfig::from_toml_str(
            r#"
            instrument = "AAPL"
            cash = "EUR"

            [[accounts]]
            user_id = "alice"
            balances = { AAPL = 5, EUR = 1000.5 }
            "#,
        )
        .unwrap();

        assert_eq!(config.instrument, "AAPL");
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].user_id, "alice");
        assert_eq!(config.accounts[0].balances["EUR"], Decimal::new(10005, 1));
    }

    #[test]
    fn test_cli_listen_override() {
        let cli = Cli::parse_from(["gateway", "--listen", "127.0.0.1:8081"]);
        let config = GatewayConfig::from_cli(&cli).unwrap();
        assert_eq!(config.listen_addr.port(), 8081);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(GatewayConfig::load(Some(Path::new("/nonexistent/gateway.toml"))).is_err());
    }
}

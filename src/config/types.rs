use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;

use crate::raydium::DEFAULT_CATALOG_URL;
use crate::solana::DEFAULT_RPC_URL;

/// Configuration for the quoter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Solana RPC URL
    pub rpc_url: String,
    /// Raydium REST catalog base URL
    pub catalog_url: String,
    /// Per-request deadline for catalog calls
    pub catalog_timeout_secs: u64,
    /// Per-request deadline for RPC calls; `None` leaves the HTTP client default
    pub rpc_timeout_secs: Option<u64>,
    /// Serve quotes from the built-in mock pools
    pub use_mock: bool,
    /// Discover pools through the REST catalog
    pub use_api: bool,
    /// Read reserves from the on-chain pool layout and vault balances
    pub use_onchain: bool,
}

/// Where pool identity and reserves come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Mock,
    Live { use_api: bool, use_onchain: bool },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout_secs: 10,
            rpc_timeout_secs: None,
            use_mock: false,
            use_api: false,
            use_onchain: false,
        }
    }
}

impl Config {
    /// The pool strategy selected by the flags; mock mode wins over the others
    pub fn strategy(&self) -> Strategy {
        if self.use_mock {
            Strategy::Mock
        } else {
            Strategy::Live {
                use_api: self.use_api,
                use_onchain: self.use_onchain,
            }
        }
    }
}

/// Loads configuration from environment variables, falling back to default values
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(rpc_url) = env::var("RPC_URL") {
        config.rpc_url = rpc_url;
    }

    if let Ok(catalog_url) = env::var("RAYDIUM_API_URL") {
        config.catalog_url = catalog_url;
    }

    if let Ok(timeout) = env::var("RAYDIUM_API_TIMEOUT_SECS") {
        match timeout.parse::<u64>() {
            Ok(value) => config.catalog_timeout_secs = value,
            Err(_) => warn!("Ignoring invalid RAYDIUM_API_TIMEOUT_SECS: {}", timeout),
        }
    }

    if let Ok(timeout) = env::var("RPC_TIMEOUT_SECS") {
        match timeout.parse::<u64>() {
            Ok(value) => config.rpc_timeout_secs = Some(value),
            Err(_) => warn!("Ignoring invalid RPC_TIMEOUT_SECS: {}", timeout),
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.catalog_url, "https://api-v3.raydium.io");
        assert_eq!(config.catalog_timeout_secs, 10);
        assert_eq!(
            config.strategy(),
            Strategy::Live { use_api: false, use_onchain: false }
        );
    }

    #[test]
    fn test_mock_overrides_other_flags() {
        let config = Config {
            use_mock: true,
            use_api: true,
            use_onchain: true,
            ..Config::default()
        };
        assert_eq!(config.strategy(), Strategy::Mock);
    }
}

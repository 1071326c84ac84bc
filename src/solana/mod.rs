pub mod client;
pub mod rpc_helpers;
pub mod types;

pub use client::SolanaClient;
pub use client::DEFAULT_RPC_URL;
pub use rpc_helpers::*;
pub use types::{UiAccount, UiTokenAmount};

use crate::config::Config;
use crate::error::Result;
use std::time::Duration;

/// Create a Solana client from the application configuration
pub fn create_client_from_config(config: &Config) -> Result<SolanaClient> {
    match config.rpc_timeout_secs {
        Some(secs) => SolanaClient::with_timeout(&config.rpc_url, Duration::from_secs(secs)),
        None => Ok(SolanaClient::new(&config.rpc_url)),
    }
}

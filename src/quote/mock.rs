use async_trait::async_trait;
use num_bigint::BigUint;
use std::collections::HashMap;

use crate::error::{QuoteError, Result};
use crate::models::PoolDescriptor;
use crate::quote::strategy::{PoolLoader, PoolLocation, StaticPoolLocator};
use crate::quote::tokens::{USDC_MINT, USDT_MINT};
use crate::raydium::WSOL_MINT;

pub const MOCK_USDC_POOL: &str = "6UmmUiYoBjSrhakAobJw8BvkmJtDVxaeBtbt7rxWo1mg";
pub const MOCK_USDT_POOL: &str = "7XawhbbxtsRcQA8KTkHT9f9nc6d69UwqCDh6U5EEbEmX";

fn mock_pool(pool_address: &str, base_mint: &str, base_reserve: u64, quote_reserve: u64) -> PoolDescriptor {
    PoolDescriptor {
        pool_address: pool_address.to_string(),
        base_mint: base_mint.to_string(),
        quote_mint: WSOL_MINT.to_string(),
        base_reserve: BigUint::from(base_reserve),
        quote_reserve: BigUint::from(quote_reserve),
        base_decimals: 6,
        quote_decimals: 9,
    }
}

/// Offline pools keyed by token mint
///
/// - USDC: 50,000,000 USDC against 1,000 SOL
/// - USDT: 30,000,000 USDT against 600 SOL
pub fn mock_pools() -> Vec<(&'static str, PoolDescriptor)> {
    vec![
        (USDC_MINT, mock_pool(MOCK_USDC_POOL, USDC_MINT, 50_000_000_000_000, 1_000_000_000_000)),
        (USDT_MINT, mock_pool(MOCK_USDT_POOL, USDT_MINT, 30_000_000_000_000, 600_000_000_000)),
    ]
}

/// Locator over the mock table
pub fn mock_locator() -> StaticPoolLocator {
    let pools = mock_pools()
        .into_iter()
        .map(|(mint, pool)| (mint, pool.pool_address));
    StaticPoolLocator::new("mock", pools)
}

/// Serves the mock pools without touching the network
pub struct MockPoolLoader {
    pools: HashMap<String, PoolDescriptor>,
}

impl MockPoolLoader {
    pub fn new() -> Self {
        let pools = mock_pools()
            .into_iter()
            .map(|(_, pool)| (pool.pool_address.clone(), pool))
            .collect();
        Self { pools }
    }
}

impl Default for MockPoolLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoolLoader for MockPoolLoader {
    async fn load(&self, location: &PoolLocation) -> Result<PoolDescriptor> {
        self.pools
            .get(&location.pool_address)
            .cloned()
            .ok_or_else(|| {
                QuoteError::UnknownPool(format!("no mock pool available for {}", location.pool_address))
            })
    }
}

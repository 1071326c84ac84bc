//! Pool discovery and pool loading strategies.
//!
//! A [`PoolLocator`] turns a token mint into a pool identifier and a
//! [`PoolLoader`] turns that identifier into a [`PoolDescriptor`]. The quote
//! service composes one of each according to the configured mode.

use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{QuoteError, Result};
use crate::models::PoolDescriptor;
use crate::quote::tokens::KnownTokenMap;
use crate::raydium::{CatalogPool, RaydiumApiClient, RaydiumClient};

/// Where a token's pool lives, plus the catalog record when discovery produced one
#[derive(Debug, Clone)]
pub struct PoolLocation {
    pub pool_address: String,
    pub catalog_record: Option<CatalogPool>,
}

impl PoolLocation {
    pub fn new(pool_address: impl Into<String>) -> Self {
        Self {
            pool_address: pool_address.into(),
            catalog_record: None,
        }
    }
}

/// Resolves the pool to quote against for a token
#[async_trait]
pub trait PoolLocator: Send + Sync {
    async fn locate(&self, token_address: &str) -> Result<PoolLocation>;
}

/// Produces a pool snapshot for a located pool
#[async_trait]
pub trait PoolLoader: Send + Sync {
    async fn load(&self, location: &PoolLocation) -> Result<PoolDescriptor>;
}

/// Fixed mint-to-pool table
pub struct StaticPoolLocator {
    label: &'static str,
    pools: HashMap<String, String>,
}

impl StaticPoolLocator {
    pub fn new<M, P>(label: &'static str, pools: impl IntoIterator<Item = (M, P)>) -> Self
    where
        M: AsRef<str>,
        P: Into<String>,
    {
        let pools = pools
            .into_iter()
            .map(|(mint, pool)| (mint.as_ref().to_lowercase(), pool.into()))
            .collect();
        Self { label, pools }
    }

    /// The mainnet pools of the known-token map
    pub fn hardcoded() -> Self {
        Self::new("hardcoded", KnownTokenMap::global().pools())
    }
}

#[async_trait]
impl PoolLocator for StaticPoolLocator {
    async fn locate(&self, token_address: &str) -> Result<PoolLocation> {
        let pool_address = self
            .pools
            .get(&token_address.to_lowercase())
            .ok_or_else(|| {
                QuoteError::UnknownPool(format!("no {} pool for token {}", self.label, token_address))
            })?;

        info!(
            "Using {} pool address: {} for token {}",
            self.label, pool_address, token_address
        );
        Ok(PoolLocation::new(pool_address.clone()))
    }
}

/// Searches the REST catalog for the deepest SOL-paired pool
pub struct CatalogPoolLocator {
    api: Arc<RaydiumApiClient>,
}

impl CatalogPoolLocator {
    pub fn new(api: Arc<RaydiumApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PoolLocator for CatalogPoolLocator {
    async fn locate(&self, token_address: &str) -> Result<PoolLocation> {
        info!("Searching for pool via Raydium API for token: {}", token_address);
        let pool = self.api.find_pool_by_token(token_address).await?;

        info!(
            "Found pool via API: {} ({}-{}) with TVL ${:.2}",
            pool.id, pool.mint_a.symbol, pool.mint_b.symbol, pool.tvl
        );
        debug!(
            "Pool {}: type {} program {} price {} fee rate {} day volume {:.2}",
            pool.id, pool.pool_type, pool.program_id, pool.price, pool.fee_rate, pool.day.volume
        );

        Ok(PoolLocation {
            pool_address: pool.id.clone(),
            catalog_record: Some(pool),
        })
    }
}

/// Uses the reserves reported by the catalog
pub struct CatalogPoolLoader {
    api: Arc<RaydiumApiClient>,
}

impl CatalogPoolLoader {
    pub fn new(api: Arc<RaydiumApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PoolLoader for CatalogPoolLoader {
    async fn load(&self, location: &PoolLocation) -> Result<PoolDescriptor> {
        match &location.catalog_record {
            Some(record) => PoolDescriptor::try_from(record),
            None => {
                let record = self.api.get_pool_by_id(&location.pool_address).await?;
                PoolDescriptor::try_from(&record)
            }
        }
    }
}

/// Reads the pool layout, then both vault balances
pub struct OnchainPoolLoader {
    raydium: Arc<RaydiumClient>,
}

impl OnchainPoolLoader {
    pub fn new(raydium: Arc<RaydiumClient>) -> Self {
        Self { raydium }
    }
}

#[async_trait]
impl PoolLoader for OnchainPoolLoader {
    async fn load(&self, location: &PoolLocation) -> Result<PoolDescriptor> {
        info!("Using onchain data for pool {}", location.pool_address);
        self.raydium.get_pool_info_onchain(&location.pool_address).await
    }
}

/// Reads the pool layout, then both vault accounts in one call
pub struct LegacyRpcPoolLoader {
    raydium: Arc<RaydiumClient>,
}

impl LegacyRpcPoolLoader {
    pub fn new(raydium: Arc<RaydiumClient>) -> Self {
        Self { raydium }
    }
}

#[async_trait]
impl PoolLoader for LegacyRpcPoolLoader {
    async fn load(&self, location: &PoolLocation) -> Result<PoolDescriptor> {
        self.raydium.get_pool_info(&location.pool_address).await
    }
}

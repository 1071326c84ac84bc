use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::config::{Config, Strategy};
use crate::error::Result;
use crate::models::{PoolDescriptor, QuoteRequest, QuoteResponse, PROTOCOL_NAME};
use crate::quote::mock::{mock_locator, MockPoolLoader};
use crate::quote::strategy::{
    CatalogPoolLoader, CatalogPoolLocator, LegacyRpcPoolLoader, OnchainPoolLoader, PoolLoader, PoolLocator,
    StaticPoolLocator,
};
use crate::quote::tokens::token_symbol;
use crate::raydium::{calculate_price, RaydiumApiClient, RaydiumClient};
use crate::solana::{create_client_from_config, SolanaClient};
use crate::utils::{display_decimals, format_fixed, ratio_to_f64};

/// Quotes trades against constant-product pools.
///
/// Loaded pools are memoized by pool address for the lifetime of the service.
/// The cache lock is never held across a network call, so concurrent misses
/// for the same pool may both load it; the last insert wins.
pub struct QuoteService {
    locator: Box<dyn PoolLocator>,
    loader: Box<dyn PoolLoader>,
    cache: Mutex<HashMap<String, Arc<PoolDescriptor>>>,
}

impl QuoteService {
    /// Compose the locator and loader for `strategy`
    ///
    /// | api | onchain | pool identity | reserves |
    /// |-----|---------|---------------|----------|
    /// | no  | no      | hardcoded     | layout + vault accounts |
    /// | no  | yes     | hardcoded     | layout + vault balances |
    /// | yes | no      | catalog       | catalog |
    /// | yes | yes     | catalog       | layout + vault balances |
    pub fn new(strategy: Strategy, solana: Arc<SolanaClient>, api: Arc<RaydiumApiClient>) -> Self {
        let (locator, loader): (Box<dyn PoolLocator>, Box<dyn PoolLoader>) = match strategy {
            Strategy::Mock => (Box::new(mock_locator()), Box::new(MockPoolLoader::new())),
            Strategy::Live { use_api, use_onchain } => {
                let raydium = Arc::new(RaydiumClient::new(solana));

                let locator: Box<dyn PoolLocator> = if use_api {
                    Box::new(CatalogPoolLocator::new(api.clone()))
                } else {
                    Box::new(StaticPoolLocator::hardcoded())
                };

                let loader: Box<dyn PoolLoader> = match (use_api, use_onchain) {
                    (_, true) => Box::new(OnchainPoolLoader::new(raydium)),
                    (true, false) => Box::new(CatalogPoolLoader::new(api)),
                    (false, false) => Box::new(LegacyRpcPoolLoader::new(raydium)),
                };

                (locator, loader)
            }
        };

        Self::with_components(locator, loader)
    }

    /// Build the clients described by `config` and compose its strategy
    pub fn from_config(config: &Config) -> Result<Self> {
        let solana = Arc::new(create_client_from_config(config)?);
        debug!("RPC endpoint {}, catalog {}", solana.rpc_url(), config.catalog_url);
        let api = Arc::new(RaydiumApiClient::with_base_url(
            &config.catalog_url,
            Duration::from_secs(config.catalog_timeout_secs),
        )?);

        Ok(Self::new(config.strategy(), solana, api))
    }

    pub fn with_components(locator: Box<dyn PoolLocator>, loader: Box<dyn PoolLoader>) -> Self {
        Self {
            locator,
            loader,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Validate, find the pool, price the trade and format the result
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        request.validate()?;

        let pool = self.find_pool(&request.token_address).await?;
        let price = calculate_price(&pool, &request.quantity, request.side)?;

        if let Some(marginal) = pool.marginal_price() {
            debug!(
                "Pool {}: marginal price {:.8}, effective {:.8} per unit",
                pool.pool_address,
                ratio_to_f64(&marginal),
                ratio_to_f64(&(&price / &request.quantity))
            );
        }

        let decimals = display_decimals(&price);
        let price_formatted = format_fixed(&price, decimals);

        Ok(QuoteResponse {
            price,
            price_formatted,
            token_symbol: token_symbol(&request.token_address),
            decimals,
            protocol: PROTOCOL_NAME.to_string(),
        })
    }

    /// Number of pools held in the cache
    pub fn cached_pools(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    async fn find_pool(&self, token_address: &str) -> Result<Arc<PoolDescriptor>> {
        let location = self.locator.locate(token_address).await?;

        if let Some(pool) = self.cached(&location.pool_address) {
            debug!("Pool {} served from cache", location.pool_address);
            return Ok(pool);
        }

        let pool = Arc::new(self.loader.load(&location).await?);
        info!(
            "Loaded pool {}: {} {} / {} {}",
            pool.pool_address, pool.base_reserve, pool.base_mint, pool.quote_reserve, pool.quote_mint
        );

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.pool_address, pool.clone());

        Ok(pool)
    }

    fn cached(&self, pool_address: &str) -> Option<Arc<PoolDescriptor>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pool_address)
            .cloned()
    }
}

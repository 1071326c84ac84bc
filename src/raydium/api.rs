//! Client for the Raydium v3 REST pool catalog

use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{QuoteError, Result};
use crate::models::PoolDescriptor;
use crate::utils::ui_to_units;

/// Public Raydium v3 API
pub const DEFAULT_CATALOG_URL: &str = "https://api-v3.raydium.io";

/// Canonical wrapped SOL mint
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_PAGE_SIZE: u32 = 20;

/// Token side of a catalog pool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogToken {
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u8,
}

/// Trading statistics over a window
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_fee: f64,
    #[serde(default)]
    pub apr: f64,
}

/// Full pool record from `/pools/info/ids`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPool {
    #[serde(rename = "type", default)]
    pub pool_type: String,
    #[serde(default)]
    pub program_id: String,
    pub id: String,
    pub mint_a: CatalogToken,
    pub mint_b: CatalogToken,
    #[serde(default)]
    pub price: f64,
    pub mint_amount_a: f64,
    pub mint_amount_b: f64,
    #[serde(default)]
    pub fee_rate: f64,
    #[serde(default)]
    pub tvl: f64,
    #[serde(default)]
    pub day: CatalogStats,
}

impl CatalogPool {
    pub fn is_paired_with(&self, mint: &str) -> bool {
        self.mint_a.address.eq_ignore_ascii_case(mint) || self.mint_b.address.eq_ignore_ascii_case(mint)
    }
}

/// Converts catalog reserves to indivisible units (`amount * 10^decimals`, truncated).
/// The catalog reports floats, so reserves lose precision beyond ~15 significant digits.
impl TryFrom<&CatalogPool> for PoolDescriptor {
    type Error = QuoteError;

    fn try_from(pool: &CatalogPool) -> Result<Self> {
        PoolDescriptor::new(
            pool.id.clone(),
            pool.mint_a.address.clone(),
            pool.mint_b.address.clone(),
            ui_to_units(pool.mint_amount_a, pool.mint_a.decimals)?,
            ui_to_units(pool.mint_amount_b, pool.mint_b.decimals)?,
            pool.mint_a.decimals as u64,
            pool.mint_b.decimals as u64,
        )
    }
}

/// Entry of the `/pools/info/mint` search listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSearchItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub pool_type: String,
    pub mint_a: CatalogToken,
    pub mint_b: CatalogToken,
    #[serde(default)]
    pub liquidity: f64,
    #[serde(default)]
    pub tvl: f64,
}

impl PoolSearchItem {
    /// Ranking key: liquidity when reported, TVL otherwise
    pub fn liquidity_key(&self) -> f64 {
        if self.liquidity > 0.0 {
            self.liquidity
        } else {
            self.tvl
        }
    }

    pub fn is_paired_with(&self, mint: &str) -> bool {
        self.mint_a.address.eq_ignore_ascii_case(mint) || self.mint_b.address.eq_ignore_ascii_case(mint)
    }
}

#[derive(Debug, Deserialize)]
struct PoolInfoResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<Option<CatalogPool>>>,
}

#[derive(Debug, Deserialize)]
struct PoolSearchResponse {
    success: bool,
    #[serde(default)]
    data: Option<PoolSearchPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolSearchPage {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    data: Vec<PoolSearchItem>,
}

/// Pick the SOL-paired pool with the largest liquidity key.
///
/// Pools whose key is not positive are never selected; among equal keys the
/// first one listed wins.
pub fn select_best_sol_pool(pools: &[PoolSearchItem]) -> Option<&PoolSearchItem> {
    let mut best: Option<&PoolSearchItem> = None;
    let mut max_liquidity = 0.0;

    for pool in pools.iter().filter(|p| p.is_paired_with(WSOL_MINT)) {
        let liquidity = pool.liquidity_key();
        if liquidity > max_liquidity {
            best = Some(pool);
            max_liquidity = liquidity;
        }
    }

    best
}

/// Raydium REST catalog client
pub struct RaydiumApiClient {
    http: Client,
    base_url: String,
}

impl RaydiumApiClient {
    /// Client for the public API with the default 10 second timeout
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::transport(base_url, e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full record of one pool
    pub async fn get_pool_by_id(&self, pool_id: &str) -> Result<CatalogPool> {
        let response: PoolInfoResponse = self
            .get("/pools/info/ids", &[("ids", pool_id.to_string())])
            .await?;

        if !response.success {
            return Err(QuoteError::UnknownPool(format!(
                "catalog reported failure for pool ID: {}",
                pool_id
            )));
        }

        match response.data.unwrap_or_default().into_iter().next() {
            Some(Some(pool)) => Ok(pool),
            Some(None) => Err(QuoteError::UnknownPool(format!("pool not found for ID: {}", pool_id))),
            None => Err(QuoteError::UnknownPool(format!("no pool data found for ID: {}", pool_id))),
        }
    }

    /// Find the deepest pool pairing `mint` with wrapped SOL
    pub async fn find_pool_by_token(&self, mint: &str) -> Result<CatalogPool> {
        let params = [
            ("mint1", mint.to_string()),
            ("poolType", "all".to_string()),
            ("poolSortField", "liquidity".to_string()),
            ("sortType", "desc".to_string()),
            ("pageSize", SEARCH_PAGE_SIZE.to_string()),
            ("page", "1".to_string()),
        ];
        let response: PoolSearchResponse = self.get("/pools/info/mint", &params).await?;

        let page = response.data.unwrap_or_default();
        if !response.success || page.data.is_empty() {
            return Err(QuoteError::UnknownPool(format!("no pools found for token {}", mint)));
        }
        debug!(
            "Catalog listed {} pools ({} total) for {}",
            page.data.len(),
            page.count,
            mint
        );

        let best = select_best_sol_pool(&page.data).ok_or_else(|| {
            QuoteError::UnknownPool(format!("no pool found for token {} paired with SOL", mint))
        })?;
        info!(
            "Selected {} pool {} with liquidity {:.2}",
            best.pool_type,
            best.id,
            best.liquidity_key()
        );

        self.get_pool_by_id(&best.id).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| QuoteError::transport(&url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::transport(&url, e))?;

        if !status.is_success() {
            return Err(QuoteError::HttpStatus {
                endpoint: url,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| QuoteError::malformed(&url, e))
    }
}

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::raydium::WSOL_MINT;
use crate::utils::short_address;

pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";

/// Mainnet USDC-SOL AMM v4 pool
pub const USDC_SOL_POOL: &str = "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2";
/// Mainnet USDT-SOL AMM v4 pool
pub const USDT_SOL_POOL: &str = "7XawhbbxtsRcQA8KTkHT9f9nc6d69UwqCDh6U5EEbEmX";

/// Case-insensitive lookups from mint to symbol and to a known SOL pool
#[derive(Debug, Clone)]
pub struct KnownTokenMap {
    symbols: HashMap<String, &'static str>,
    pools: HashMap<String, &'static str>,
}

impl KnownTokenMap {
    /// Process-wide mainnet table
    pub fn global() -> &'static KnownTokenMap {
        static KNOWN_TOKENS: OnceLock<KnownTokenMap> = OnceLock::new();
        KNOWN_TOKENS.get_or_init(KnownTokenMap::mainnet)
    }

    fn mainnet() -> Self {
        let symbols = [(USDC_MINT, "USDC"), (USDT_MINT, "USDT"), (WSOL_MINT, "SOL")]
            .into_iter()
            .map(|(mint, symbol)| (mint.to_lowercase(), symbol))
            .collect();

        let pools = [(USDC_MINT, USDC_SOL_POOL), (USDT_MINT, USDT_SOL_POOL)]
            .into_iter()
            .map(|(mint, pool)| (mint.to_lowercase(), pool))
            .collect();

        Self { symbols, pools }
    }

    pub fn symbol(&self, mint: &str) -> Option<&'static str> {
        self.symbols.get(&mint.to_lowercase()).copied()
    }

    pub fn pool_address(&self, mint: &str) -> Option<&'static str> {
        self.pools.get(&mint.to_lowercase()).copied()
    }

    /// `(mint, pool)` pairs of the hardcoded pool table, mints lowercased
    pub fn pools(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.pools.iter().map(|(mint, pool)| (mint.as_str(), *pool))
    }
}

/// Display symbol for `address`: the known symbol, else a shortened address
pub fn token_symbol(address: &str) -> String {
    KnownTokenMap::global()
        .symbol(address)
        .map(str::to_string)
        .unwrap_or_else(|| short_address(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_case_insensitive() {
        assert_eq!(token_symbol(USDC_MINT), "USDC");
        assert_eq!(token_symbol(&USDT_MINT.to_uppercase()), "USDT");
        assert_eq!(token_symbol(&WSOL_MINT.to_lowercase()), "SOL");
    }

    #[test]
    fn test_unknown_symbols_are_shortened() {
        assert_eq!(token_symbol("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"), "DezX...B263");
        assert_eq!(token_symbol("BONK"), "BONK");
        assert_eq!(token_symbol("12345678"), "12345678");
    }

    #[test]
    fn test_hardcoded_pools() {
        let known = KnownTokenMap::global();

        assert_eq!(known.pool_address(&USDC_MINT.to_lowercase()), Some(USDC_SOL_POOL));
        assert_eq!(known.pool_address(USDT_MINT), Some(USDT_SOL_POOL));
        assert_eq!(known.pool_address(WSOL_MINT), None);
        assert_eq!(known.pools().count(), 2);
    }
}

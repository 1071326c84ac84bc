pub mod mock;
pub mod service;
pub mod strategy;
pub mod tokens;

pub use mock::{mock_locator, mock_pools, MockPoolLoader};
pub use service::QuoteService;
pub use strategy::{
    CatalogPoolLoader, CatalogPoolLocator, LegacyRpcPoolLoader, OnchainPoolLoader, PoolLoader, PoolLocation,
    PoolLocator, StaticPoolLocator,
};
pub use tokens::{token_symbol, KnownTokenMap};

pub mod api;
pub mod client;
pub mod layout;
pub mod pricing;

pub use api::{CatalogPool, PoolSearchItem, RaydiumApiClient, DEFAULT_CATALOG_URL, WSOL_MINT};
pub use client::RaydiumClient;
pub use layout::AmmLayout;
pub use pricing::calculate_price;

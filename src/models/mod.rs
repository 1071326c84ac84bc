pub mod pool;
pub mod quote;

pub use pool::PoolDescriptor;
pub use pool::MAX_DECIMALS;
pub use quote::QuoteRequest;
pub use quote::QuoteResponse;
pub use quote::Side;
pub use quote::PROTOCOL_NAME;

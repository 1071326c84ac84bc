pub mod config;
pub mod error;
pub mod models;
pub mod padding;
pub mod quote;
pub mod raydium;
pub mod solana;
pub mod utils;

use num_rational::BigRational;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuoteError, Result};
use crate::utils::{parse_decimal, ratio_to_f64};

/// Protocol reported on every quote
pub const PROTOCOL_NAME: &str = "Raydium";

/// Trade direction, relative to the quote asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Take `quantity` quote out of the pool, paying base
    Buy,
    /// Put `quantity` quote into the pool, receiving base
    Sell,
}

impl FromStr for Side {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(QuoteError::InvalidInput(format!(
                "invalid side: {} (must be 'buy' or 'sell')",
                s
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// A validated request for a price quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub token_address: String,
    pub quantity: BigRational,
    pub side: Side,
}

impl QuoteRequest {
    /// Validate and build a request from raw caller input
    pub fn new(token_address: &str, quantity: BigRational, side: &str) -> Result<Self> {
        let request = Self {
            token_address: token_address.to_string(),
            quantity,
            side: side.parse()?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Same as [`QuoteRequest::new`] with the quantity given as a decimal string
    pub fn parse(token_address: &str, quantity: &str, side: &str) -> Result<Self> {
        Self::new(token_address, parse_decimal(quantity)?, side)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_address.trim().is_empty() {
            return Err(QuoteError::InvalidInput("token address is required".to_string()));
        }
        if !self.quantity.is_positive() {
            return Err(QuoteError::InvalidInput("quantity must be positive".to_string()));
        }
        Ok(())
    }
}

/// Result of a quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub price: BigRational,
    pub price_formatted: String,
    pub token_symbol: String,
    pub decimals: u32,
    pub protocol: String,
}

impl QuoteResponse {
    /// Lossy float view of the price
    pub fn price_f64(&self) -> f64 {
        ratio_to_f64(&self.price)
    }
}

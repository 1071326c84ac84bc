use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::utils::units_to_ui;

/// Largest decimals exponent accepted for a token
pub const MAX_DECIMALS: u8 = 18;

/// Snapshot of a constant-product pool.
///
/// Reserves are kept in indivisible units; `base_reserve_ui`/`quote_reserve_ui`
/// give the decimal-normalized view used by the pricing kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDescriptor {
    pub pool_address: String,
    pub base_mint: String,
    pub quote_mint: String,
    pub base_reserve: BigUint,
    pub quote_reserve: BigUint,
    pub base_decimals: u8,
    pub quote_decimals: u8,
}

impl PoolDescriptor {
    /// Build a descriptor, rejecting decimals outside `0..=18`
    pub fn new(
        pool_address: impl Into<String>,
        base_mint: impl Into<String>,
        quote_mint: impl Into<String>,
        base_reserve: BigUint,
        quote_reserve: BigUint,
        base_decimals: u64,
        quote_decimals: u64,
    ) -> Result<Self> {
        let pool_address = pool_address.into();
        let base_decimals = checked_decimals(&pool_address, "base", base_decimals)?;
        let quote_decimals = checked_decimals(&pool_address, "quote", quote_decimals)?;

        Ok(Self {
            pool_address,
            base_mint: base_mint.into(),
            quote_mint: quote_mint.into(),
            base_reserve,
            quote_reserve,
            base_decimals,
            quote_decimals,
        })
    }

    pub fn base_reserve_ui(&self) -> BigRational {
        units_to_ui(&self.base_reserve, self.base_decimals)
    }

    pub fn quote_reserve_ui(&self) -> BigRational {
        units_to_ui(&self.quote_reserve, self.quote_decimals)
    }

    /// Base paid per unit of quote for an infinitesimal trade (b / q)
    pub fn marginal_price(&self) -> Option<BigRational> {
        let quote = self.quote_reserve_ui();
        if quote.is_zero() {
            return None;
        }
        Some(self.base_reserve_ui() / quote)
    }
}

fn checked_decimals(pool: &str, side: &str, decimals: u64) -> Result<u8> {
    u8::try_from(decimals)
        .ok()
        .filter(|d| *d <= MAX_DECIMALS)
        .ok_or_else(|| {
            QuoteError::Decode(format!(
                "pool {} has {} decimals {} outside 0..={}",
                pool, side, decimals, MAX_DECIMALS
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_rejects_out_of_range_decimals() {
        let err = PoolDescriptor::new("pool", "a", "b", BigUint::from(1u8), BigUint::from(1u8), 19, 9)
            .unwrap_err();
        assert!(err.to_string().contains("base decimals 19"));

        assert!(PoolDescriptor::new("pool", "a", "b", BigUint::zero(), BigUint::zero(), 18, 0).is_ok());
    }

    #[test]
    fn test_marginal_price() {
        let pool = PoolDescriptor::new(
            "pool",
            "a",
            "b",
            BigUint::from(1_000_000_000_000u64),
            BigUint::from(50_000_000_000u64),
            9,
            9,
        )
        .unwrap();

        assert_eq!(pool.marginal_price(), Some(BigRational::from_integer(BigInt::from(20))));
    }
}

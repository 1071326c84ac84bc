//! Constant-product pricing over decimal-normalized reserves

use log::debug;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{QuoteError, Result};
use crate::models::{PoolDescriptor, Side};

/// Base amount paid (buy) or received (sell) for `quantity` of the quote asset.
///
/// The pool is treated as frictionless: `b * q = k` holds before and after the
/// trade and no fee is taken.
pub fn calculate_price(pool: &PoolDescriptor, quantity: &BigRational, side: Side) -> Result<BigRational> {
    if !quantity.is_positive() {
        return Err(QuoteError::InvalidInput(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }

    let base = pool.base_reserve_ui();
    let quote = pool.quote_reserve_ui();
    if base.is_zero() || quote.is_zero() {
        return Err(QuoteError::EmptyPool {
            pool: pool.pool_address.clone(),
        });
    }

    let k = &base * &quote;
    let price = match side {
        Side::Buy => {
            let quote_after = &quote - quantity;
            if !quote_after.is_positive() {
                return Err(QuoteError::InsufficientDepth {
                    pool: pool.pool_address.clone(),
                    requested: quantity.to_string(),
                    available: quote.to_string(),
                });
            }
            k / quote_after - &base
        }
        Side::Sell => &base - k / (&quote + quantity),
    };

    debug!(
        "Pool {} {} {}: base {} quote {} -> {}",
        pool.pool_address, side, quantity, base, quote, price
    );

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use num_bigint::{BigInt, BigUint};
    use proptest::prelude::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn pool(base: u64, quote: u64, base_decimals: u64, quote_decimals: u64) -> PoolDescriptor {
        PoolDescriptor::new(
            "pool",
            "base",
            "quote",
            BigUint::from(base),
            BigUint::from(quote),
            base_decimals,
            quote_decimals,
        )
        .unwrap()
    }

    /// 1000 base / 50 quote, both 9 decimals
    fn reference_pool() -> PoolDescriptor {
        pool(1_000_000_000_000, 50_000_000_000, 9, 9)
    }

    #[test]
    fn test_buy_one_lands_in_expected_band() {
        let price = calculate_price(&reference_pool(), &ratio(1, 1), Side::Buy).unwrap();

        assert!(price > ratio(10, 1) && price < ratio(30, 1));
        // 50000 / 49 - 1000
        assert_eq!(price, ratio(1000, 49));
    }

    #[test]
    fn test_sell_one() {
        let price = calculate_price(&reference_pool(), &ratio(1, 1), Side::Sell).unwrap();

        // 1000 - 50000 / 51
        assert_eq!(price, ratio(1000, 51));
    }

    #[test]
    fn test_slippage_is_convex() {
        let pool = reference_pool();
        let one = ratio(1, 1);
        let two = ratio(2, 1);

        let buy_one = calculate_price(&pool, &one, Side::Buy).unwrap();
        let buy_two = calculate_price(&pool, &two, Side::Buy).unwrap();
        assert!(buy_two > &buy_one * ratio(2, 1));

        let sell_one = calculate_price(&pool, &one, Side::Sell).unwrap();
        let sell_two = calculate_price(&pool, &two, Side::Sell).unwrap();
        assert!(sell_two < &sell_one * ratio(2, 1));
    }

    #[test]
    fn test_zero_trade_limit_is_marginal_price() {
        let pool = reference_pool();
        let marginal = pool.marginal_price().unwrap();
        let tiny = ratio(1, 1_000_000);
        let tolerance = ratio(1, 100_000);

        for side in [Side::Buy, Side::Sell] {
            let per_unit = calculate_price(&pool, &tiny, side).unwrap() / &tiny;
            assert!((per_unit - &marginal).abs() < tolerance, "{} drifted", side);
        }
    }

    #[test]
    fn test_mixed_decimals() {
        // 50M base at 6 decimals against 1000 quote at 9 decimals
        let pool = pool(50_000_000_000_000, 1_000_000_000_000, 6, 9);
        let price = calculate_price(&pool, &ratio(1, 1), Side::Buy).unwrap();

        assert_eq!(price, ratio(50_000_000, 999));
    }

    #[test]
    fn test_empty_pool() {
        for pool in [pool(0, 50, 9, 9), pool(1_000, 0, 9, 9)] {
            let err = calculate_price(&pool, &ratio(1, 1), Side::Sell).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EmptyPool);
        }
    }

    #[test]
    fn test_insufficient_depth() {
        let pool = reference_pool();

        for quantity in [ratio(50, 1), ratio(75, 1)] {
            let err = calculate_price(&pool, &quantity, Side::Buy).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InsufficientDepth);
        }

        // selling into the pool has no depth limit
        assert!(calculate_price(&pool, &ratio(75, 1), Side::Sell).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let err = calculate_price(&reference_pool(), &ratio(0, 1), Side::Buy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    proptest! {
        #[test]
        fn prop_small_trades_are_positive(
            base in 1u64..,
            quote in 2u64..,
            base_decimals in 0u64..=18,
            quote_decimals in 0u64..=18,
            share in 1i64..1000,
        ) {
            let pool = pool(base, quote, base_decimals, quote_decimals);
            let quantity = pool.quote_reserve_ui() * ratio(share, 1000);

            prop_assert!(calculate_price(&pool, &quantity, Side::Buy).unwrap().is_positive());
            prop_assert!(calculate_price(&pool, &quantity, Side::Sell).unwrap().is_positive());
        }
    }
}

//! Fixed-offset views over Raydium AMM v4 pool accounts and SPL token accounts

use log::debug;
use num_bigint::BigUint;

use crate::error::{QuoteError, Result};
use crate::solana::{read_pubkey, read_u64_le};

/// Smallest pool account accepted by the decoder
pub const MIN_POOL_ACCOUNT_LEN: usize = 600;

pub const BASE_DECIMALS_OFFSET: usize = 32;
pub const QUOTE_DECIMALS_OFFSET: usize = 40;
pub const BASE_VAULT_OFFSET: usize = 336;
pub const QUOTE_VAULT_OFFSET: usize = 368;
pub const BASE_MINT_OFFSET: usize = 400;
pub const QUOTE_MINT_OFFSET: usize = 432;

/// SPL token account: mint (32) | owner (32) | amount (u64 LE) | ...
pub const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;

/// Fields read from an AMM v4 pool account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmmLayout {
    pub base_decimals: u64,
    pub quote_decimals: u64,
    pub base_mint: String,
    pub quote_mint: String,
    pub base_vault: String,
    pub quote_vault: String,
}

impl AmmLayout {
    /// Decode the pool account `data` of `pool_address`
    pub fn decode(pool_address: &str, data: &[u8]) -> Result<Self> {
        if data.len() < MIN_POOL_ACCOUNT_LEN {
            return Err(QuoteError::Decode(format!(
                "pool {} data too short: {} bytes (expected at least {})",
                pool_address,
                data.len(),
                MIN_POOL_ACCOUNT_LEN
            )));
        }

        let layout = Self {
            base_decimals: read_u64_le(data, BASE_DECIMALS_OFFSET)?,
            quote_decimals: read_u64_le(data, QUOTE_DECIMALS_OFFSET)?,
            base_mint: read_pubkey(data, BASE_MINT_OFFSET)?,
            quote_mint: read_pubkey(data, QUOTE_MINT_OFFSET)?,
            base_vault: read_pubkey(data, BASE_VAULT_OFFSET)?,
            quote_vault: read_pubkey(data, QUOTE_VAULT_OFFSET)?,
        };
        debug!("Decoded pool {}: {:?}", pool_address, layout);

        Ok(layout)
    }
}

/// Read `amount` from raw SPL token account data
pub fn decode_token_account_amount(address: &str, data: &[u8]) -> Result<BigUint> {
    read_u64_le(data, TOKEN_ACCOUNT_AMOUNT_OFFSET)
        .map(BigUint::from)
        .map_err(|_| {
            QuoteError::Decode(format!(
                "token account {} data too short: {} bytes",
                address,
                data.len()
            ))
        })
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::error::ErrorKind;
    use crate::utils::base58;

    #[test]
    fn test_decode_reads_documented_offsets() {
        let data = pool_account_bytes(6, 9, key(1), key(2), key(3), key(4));
        let layout = AmmLayout::decode("pool", &data).unwrap();

        assert_eq!(layout.base_decimals, 6);
        assert_eq!(layout.quote_decimals, 9);
        assert_eq!(layout.base_mint, base58::encode(&key(1)));
        assert_eq!(layout.quote_mint, base58::encode(&key(2)));
        assert_eq!(layout.base_vault, base58::encode(&key(3)));
        assert_eq!(layout.quote_vault, base58::encode(&key(4)));
    }

    #[test]
    fn test_decode_rejects_short_accounts() {
        let err = AmmLayout::decode("pool", &[0u8; 599]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("599 bytes"));

        assert!(AmmLayout::decode("pool", &[0u8; 600]).is_ok());
    }

    #[test]
    fn test_token_account_amount() {
        let data = token_account_bytes(123_456_789);
        assert_eq!(decode_token_account_amount("vault", &data).unwrap(), BigUint::from(123_456_789u64));

        let err = decode_token_account_amount("vault", &data[..70]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}

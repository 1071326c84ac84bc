use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use num_bigint::BigUint;

use crate::error::{QuoteError, Result};
use crate::solana::types::UiAccount;
use crate::utils::base58;

/// Size of a Solana public key in bytes
pub const PUBKEY_LEN: usize = 32;

/// Decode the raw bytes of an account fetched with `encoding: "base64"`
pub fn decode_account_data(address: &str, account: &UiAccount) -> Result<Vec<u8>> {
    let (payload, encoding) = match account.data.as_slice() {
        [payload, encoding, ..] => (payload, encoding.as_str()),
        _ => {
            return Err(QuoteError::Decode(format!(
                "invalid account data format for {}",
                address
            )))
        }
    };

    if encoding != "base64" {
        return Err(QuoteError::Decode(format!(
            "unexpected data encoding {:?} for {}",
            encoding, address
        )));
    }

    Ok(STANDARD.decode(payload)?)
}

/// Read a little-endian u64 at `offset`
pub fn read_u64_le(data: &[u8], offset: usize) -> Result<u64> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| {
            QuoteError::Decode(format!(
                "u64 at offset {} out of bounds ({} bytes)",
                offset,
                data.len()
            ))
        })
}

/// Read a 32-byte public key at `offset` and render it in base58
pub fn read_pubkey(data: &[u8], offset: usize) -> Result<String> {
    data.get(offset..offset + PUBKEY_LEN)
        .map(base58::encode)
        .ok_or_else(|| {
            QuoteError::Decode(format!(
                "pubkey at offset {} out of bounds ({} bytes)",
                offset,
                data.len()
            ))
        })
}

/// Parse the decimal `amount` string of a token balance
pub fn parse_token_amount(amount: &str) -> Result<BigUint> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuoteError::Decode(format!("failed to parse amount: {:?}", amount)));
    }
    amount
        .parse()
        .map_err(|_| QuoteError::Decode(format!("failed to parse amount: {:?}", amount)))
}

//! Base58 codec for 32-byte Solana account identifiers

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    #[error("invalid base58 character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("invalid base58 string: {0}")]
    Invalid(String),
}

impl From<bs58::decode::Error> for Base58Error {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                Base58Error::InvalidCharacter { character, index }
            }
            other => Base58Error::Invalid(other.to_string()),
        }
    }
}

/// Encode bytes to a base58 string
pub fn encode(input: &[u8]) -> String {
    bs58::encode(input).into_string()
}

/// Decode a base58 string to bytes
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    Ok(bs58::decode(input).into_vec()?)
}

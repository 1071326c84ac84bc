//! Error types for the quote engine

use thiserror::Error;

use crate::utils::base58::Base58Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Coarse classification of a [`QuoteError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UnknownPool,
    NotFound,
    Transport,
    Rpc,
    Decode,
    EmptyPool,
    InsufficientDepth,
}

/// Errors raised while locating, loading or pricing a pool
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown pool: {0}")]
    UnknownPool(String),

    #[error("Account not found: {address}")]
    AccountNotFound { address: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} failed with status {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("RPC error: {message} (code: {code})")]
    Rpc { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Pool {pool} has zero reserves - pool may be inactive or not initialized")]
    EmptyPool { pool: String },

    #[error("Insufficient pool depth in {pool}: requested {requested}, available {available}")]
    InsufficientDepth {
        pool: String,
        requested: String,
        available: String,
    },
}

impl QuoteError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::InvalidInput(_) => ErrorKind::InvalidInput,
            QuoteError::UnknownPool(_) => ErrorKind::UnknownPool,
            QuoteError::AccountNotFound { .. } => ErrorKind::NotFound,
            QuoteError::Transport { .. }
            | QuoteError::HttpStatus { .. }
            | QuoteError::MalformedResponse { .. } => ErrorKind::Transport,
            QuoteError::Rpc { .. } => ErrorKind::Rpc,
            QuoteError::Decode(_) => ErrorKind::Decode,
            QuoteError::EmptyPool { .. } => ErrorKind::EmptyPool,
            QuoteError::InsufficientDepth { .. } => ErrorKind::InsufficientDepth,
        }
    }

    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        QuoteError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(crate) fn malformed(endpoint: &str, reason: impl ToString) -> Self {
        QuoteError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<Base58Error> for QuoteError {
    fn from(err: Base58Error) -> Self {
        QuoteError::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for QuoteError {
    fn from(err: base64::DecodeError) -> Self {
        QuoteError::Decode(format!("invalid base64 account data: {}", err))
    }
}

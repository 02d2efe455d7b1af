//! Error types for the sealing façade.

use ratecard_seal_core::CoreError;
use ratecard_seal_crypto::{CryptoError, KeyError};
use thiserror::Error;

/// Errors that can occur while sealing documents.
#[derive(Debug, Error)]
pub enum SealError {
    /// Document or canonicalization error.
    #[error("document error: {0}")]
    Core(#[from] CoreError),

    /// Key, signing, or certificate error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking worker panicked or was cancelled.
    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<KeyError> for SealError {
    fn from(e: KeyError) -> Self {
        SealError::Crypto(CryptoError::Key(e))
    }
}

/// Result type for sealing operations.
pub type Result<T> = std::result::Result<T, SealError>;

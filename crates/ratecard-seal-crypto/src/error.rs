//! Error types for key handling and signing.

use ratecard_seal_core::CoreError;
use thiserror::Error;

use crate::algorithm::Algorithm;

/// Errors from key generation, import, and export.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Algorithm identifier not recognized.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// PEM or DER key material could not be decoded.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The key belongs to a different family or curve.
    #[error("key of type {key} cannot be used with {algorithm}")]
    AlgorithmMismatch {
        algorithm: Algorithm,
        key: &'static str,
    },

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    Generation(String),

    /// Key export failed.
    #[error("key export failed: {0}")]
    Export(String),
}

/// Errors from signing and certificate issuance.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key error.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// The underlying sign or verify primitive failed.
    #[error("crypto operation failed: {0}")]
    Operation(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Invalid certificate request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

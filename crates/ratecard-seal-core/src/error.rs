//! Error types for Rate Card Seal Core.

use thiserror::Error;

/// Core errors that can occur while handling documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value cannot be expressed in canonical form.
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Malformed JSON text.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Well-formed JSON that is not a usable document.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::ParseError(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

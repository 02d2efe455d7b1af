//! Sealing configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ratecard_seal_crypto::Algorithm;

use crate::error::{Result, SealError};

/// Configuration for a [`Sealer`](crate::Sealer).
///
/// Every field is optional in JSON; missing fields take their defaults.
///
/// ```json
/// {"algorithm": "RS256", "keyId": "ops-2026", "pinAlgorithm": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SealConfig {
    /// Algorithm for new keys and signatures.
    pub algorithm: Algorithm,
    /// Record the signing time in the signature record.
    pub include_timestamp: bool,
    /// Embed the signer's public key in the signature record.
    pub embed_public_key: bool,
    /// Identifier recorded as `keyId`.
    pub key_id: Option<String>,
    /// Add `metadata.checksum` before signing.
    pub add_checksum: bool,
    /// Reject signatures made with any algorithm other than `algorithm`.
    pub pin_algorithm: bool,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::ES256,
            include_timestamp: true,
            embed_public_key: true,
            key_id: None,
            add_checksum: true,
            pin_algorithm: false,
        }
    }
}

impl SealConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SealError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

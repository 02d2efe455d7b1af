//! Checksums: SHA-256 over the canonical form.
//!
//! A checksum detects accidental or malicious modification of a document. It
//! is stored at `metadata.checksum` as 64 lowercase hex characters, computed
//! on demand, and never revalidated automatically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::canonical::canonical_bytes;
use crate::document::{Document, CHECKSUM_KEY};
use crate::error::{CoreError, Result};

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::ParseError(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::ParseError("checksum must be 32 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Outcome of checking a stored checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumVerification {
    /// `expected == Some(actual)`.
    pub valid: bool,
    /// The stored checksum, `None` if absent.
    pub expected: Option<String>,
    /// The freshly computed checksum.
    pub actual: String,
}

/// Compute the checksum of a document.
pub fn compute_checksum(document: &Document) -> Result<String> {
    let bytes = canonical_bytes(document)?;
    Ok(Sha256Hash::hash(&bytes).to_hex())
}

/// Return a copy of the document with `metadata.checksum` set.
pub fn add_checksum(document: &Document) -> Result<Document> {
    let checksum = compute_checksum(document)?;
    tracing::debug!(%checksum, "adding checksum");
    document.with_metadata_field(CHECKSUM_KEY, Value::String(checksum))
}

/// Check the stored checksum against a fresh computation.
///
/// A document without a checksum is reported invalid: no protection present.
pub fn verify_checksum(document: &Document) -> Result<ChecksumVerification> {
    let actual = compute_checksum(document)?;
    let expected = document.checksum().map(str::to_owned);
    let valid = expected.as_deref() == Some(actual.as_str());
    Ok(ChecksumVerification {
        valid,
        expected,
        actual,
    })
}

/// Return a copy of the document without `metadata.checksum`.
pub fn remove_checksum(document: &Document) -> Document {
    document.without_metadata_field(CHECKSUM_KEY)
}

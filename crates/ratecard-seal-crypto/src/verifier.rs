//! Verification of embedded document signatures.
//!
//! The verifier never fails: every problem, from a missing record to a
//! broken key, becomes a `valid: false` result with a [`VerifyError`]. A
//! signature that simply does not match is `valid: false` with no error.
//!
//! Key resolution order:
//! 1. the key passed in [`VerifyOptions`]
//! 2. the `publicKey` embedded in the record
//! 3. otherwise [`VerifyError::NoPublicKey`]
//!
//! The algorithm comes from the stored record. Callers that know which
//! algorithm to expect should pin it with [`VerifyOptions::expect_algorithm`].

use serde::{Serialize, Serializer};
use thiserror::Error;

use ratecard_seal_core::{canonical_bytes, Document};

use crate::algorithm::Algorithm;
use crate::backend::{CryptoBackend, PublicKey, RustCryptoBackend};
use crate::error::CryptoError;
use crate::keys::{KeyManager, KeyMaterial};
use crate::record::SignatureInfo;

/// Why a signature could not be checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("no signature present")]
    MissingSignature,

    #[error("invalid signature format: {0}")]
    InvalidFormat(String),

    #[error("no public key available for verification")]
    NoPublicKey,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch { expected: Algorithm, found: String },

    #[error("invalid signature encoding: {0}")]
    InvalidEncoding(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("canonicalization failed: {0}")]
    Encoding(String),

    #[error("verification failed: {0}")]
    Crypto(String),
}

impl Serialize for VerifyError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<CryptoError> for VerifyError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::Key(e) => VerifyError::Key(e.to_string()),
            CryptoError::Core(e) => VerifyError::Encoding(e.to_string()),
            other => VerifyError::Crypto(other.to_string()),
        }
    }
}

/// Outcome of verifying a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// True only when the signature matches the current canonical bytes.
    pub valid: bool,
    /// The parsed record, when one could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_info: Option<SignatureInfo>,
    /// Why verification could not be carried out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerifyError>,
}

impl VerificationResult {
    fn failed(signature_info: Option<SignatureInfo>, error: VerifyError) -> Self {
        Self {
            valid: false,
            signature_info,
            error: Some(error),
        }
    }
}

/// Options for [`Verifier::verify`].
#[derive(Debug, Clone)]
pub struct VerifyOptions<K = PublicKey> {
    /// Overrides any key embedded in the record.
    pub public_key: Option<KeyMaterial<K>>,
    /// Reject records declaring any other algorithm.
    pub expected_algorithm: Option<Algorithm>,
}

impl<K> Default for VerifyOptions<K> {
    fn default() -> Self {
        Self {
            public_key: None,
            expected_algorithm: None,
        }
    }
}

impl<K> VerifyOptions<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public_key(mut self, key: impl Into<KeyMaterial<K>>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    pub fn expect_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.expected_algorithm = Some(algorithm);
        self
    }
}

/// Checks embedded signatures.
#[derive(Debug, Clone, Default)]
pub struct Verifier<B: CryptoBackend = RustCryptoBackend> {
    keys: KeyManager<B>,
}

impl<B: CryptoBackend> Verifier<B> {
    pub fn new(backend: B) -> Self {
        Self {
            keys: KeyManager::new(backend),
        }
    }

    pub fn from_key_manager(keys: KeyManager<B>) -> Self {
        Self { keys }
    }

    pub fn key_manager(&self) -> &KeyManager<B> {
        &self.keys
    }

    /// Verify with an explicit public key.
    pub fn verify_with_key(
        &self,
        document: &Document,
        public_key: impl Into<KeyMaterial<B::PublicKey>>,
    ) -> VerificationResult {
        self.verify(document, &VerifyOptions::new().public_key(public_key))
    }

    /// Verify with the public key embedded in the record.
    pub fn verify_embedded(&self, document: &Document) -> VerificationResult {
        self.verify(document, &VerifyOptions::new())
    }

    /// Verify a batch; one bad document never affects the others.
    pub fn verify_batch(
        &self,
        documents: &[Document],
        options: &VerifyOptions<B::PublicKey>,
    ) -> Vec<VerificationResult> {
        documents.iter().map(|d| self.verify(d, options)).collect()
    }

    /// Verify a document's embedded signature.
    pub fn verify(
        &self,
        document: &Document,
        options: &VerifyOptions<B::PublicKey>,
    ) -> VerificationResult {
        let info = match read_record(document) {
            Ok(info) => info,
            Err(error) => {
                tracing::debug!(%error, "signature record unreadable");
                return VerificationResult::failed(None, error);
            }
        };

        match self.check(document, options, &info) {
            Ok(valid) => {
                tracing::debug!(algorithm = %info.algorithm, valid, "verified document");
                VerificationResult {
                    valid,
                    signature_info: Some(info),
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(algorithm = %info.algorithm, %error, "signature check failed");
                VerificationResult::failed(Some(info), error)
            }
        }
    }

    fn check(
        &self,
        document: &Document,
        options: &VerifyOptions<B::PublicKey>,
        info: &SignatureInfo,
    ) -> Result<bool, VerifyError> {
        let algorithm = info
            .algorithm()
            .map_err(|_| VerifyError::UnsupportedAlgorithm(info.algorithm.clone()))?;

        if let Some(expected) = options.expected_algorithm {
            if expected != algorithm {
                return Err(VerifyError::AlgorithmMismatch {
                    expected,
                    found: info.algorithm.clone(),
                });
            }
        }

        let material = match (&options.public_key, &info.public_key) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(embedded)) => KeyMaterial::Pem(embedded.clone()),
            (None, None) => return Err(VerifyError::NoPublicKey),
        };
        let key = self.keys.resolve_public(material, algorithm)?;

        // The canonical form already excludes the signature itself
        let message = canonical_bytes(document).map_err(|e| VerifyError::Encoding(e.to_string()))?;

        let signature = info
            .signature_bytes()
            .map_err(|e| VerifyError::InvalidEncoding(e.to_string()))?;

        Ok(self
            .keys
            .backend()
            .verify(&key, algorithm, &message, &signature)?)
    }
}

fn read_record(document: &Document) -> Result<SignatureInfo, VerifyError> {
    match SignatureInfo::from_document(document) {
        Ok(Some(info)) => Ok(info),
        Ok(None) => Err(VerifyError::MissingSignature),
        Err(e) => Err(VerifyError::InvalidFormat(e.to_string())),
    }
}

//! Embedded document signatures.
//!
//! The signer works on a copy of the document: it signs the canonical bytes
//! and stores the record as a JSON string at `metadata.signature`,
//! replacing any previous one. `metadata.checksum` is left in
//! place; the canonical form excludes it either way.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use ratecard_seal_core::{canonical_bytes, Document, SIGNATURE_KEY};

use crate::algorithm::Algorithm;
use crate::backend::{CryptoBackend, PublicKey, RustCryptoBackend};
use crate::error::Result;
use crate::keys::{KeyManager, KeyMaterial};
use crate::record::{timestamp_now, SignatureInfo};

/// Options for [`Signer::sign`].
#[derive(Debug, Clone)]
pub struct SignOptions<K = PublicKey> {
    /// Public key to embed in the record for self-contained verification.
    pub public_key: Option<KeyMaterial<K>>,
    /// Identifier recorded as `keyId`.
    pub key_id: Option<String>,
    /// Record the signing time.
    pub include_timestamp: bool,
}

impl<K> Default for SignOptions<K> {
    fn default() -> Self {
        Self {
            public_key: None,
            key_id: None,
            include_timestamp: true,
        }
    }
}

impl<K> SignOptions<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public_key(mut self, key: impl Into<KeyMaterial<K>>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }
}

/// Produces signed copies of documents.
#[derive(Debug, Clone, Default)]
pub struct Signer<B: CryptoBackend = RustCryptoBackend> {
    keys: KeyManager<B>,
}

impl<B: CryptoBackend> Signer<B> {
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

    /// Sign a document, returning a new document carrying the signature.
    pub fn sign(
        &self,
        document: &Document,
        private_key: impl Into<KeyMaterial<B::PrivateKey>>,
        algorithm: Algorithm,
        options: &SignOptions<B::PublicKey>,
    ) -> Result<Document> {
        let key = self.keys.resolve_private(private_key.into(), algorithm)?;

        let message = canonical_bytes(document)?;
        let raw = self.keys.backend().sign(&key, algorithm, &message)?;

        let public_key = match &options.public_key {
            Some(material) => {
                // Reject a key that could never verify this signature
                self.keys.resolve_public(material.clone(), algorithm)?;
                Some(self.keys.public_pem(material)?)
            }
            None => None,
        };

        let info = SignatureInfo {
            algorithm: algorithm.as_str().to_string(),
            signature: STANDARD.encode(&raw),
            public_key,
            key_id: options.key_id.clone(),
            timestamp: options.include_timestamp.then(timestamp_now),
        };

        tracing::debug!(
            %algorithm,
            key_id = info.key_id.as_deref().unwrap_or("-"),
            bytes = message.len(),
            "signed document"
        );

        let signed = document.with_metadata_field(SIGNATURE_KEY, Value::String(info.to_json()?))?;
        Ok(signed)
    }
}

//! The Sealer: checksum and signature in one step.
//!
//! A sealed document carries `metadata.checksum` (optional, per config) and
//! `metadata.signature`. Both are computed over the same canonical form, so
//! neither one affects the other.

use serde::Serialize;

use ratecard_seal_core::{add_checksum, verify_checksum, ChecksumVerification, Document};
use ratecard_seal_crypto::{
    CryptoBackend, KeyManager, KeyMaterial, KeyPair, PemKeyPair, RustCryptoBackend, SignOptions,
    Signer, VerificationResult, Verifier, VerifyOptions,
};

use crate::config::SealConfig;
use crate::error::{Result, SealError};

/// Checksum and signature status of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealReport {
    pub checksum: ChecksumVerification,
    pub signature: VerificationResult,
}

impl SealReport {
    /// The signature verifies and any stored checksum matches.
    pub fn is_intact(&self) -> bool {
        let checksum_ok = self.checksum.expected.is_none() || self.checksum.valid;
        self.signature.valid && checksum_ok
    }
}

/// Seals and verifies documents according to a [`SealConfig`].
#[derive(Debug, Clone)]
pub struct Sealer<B: CryptoBackend = RustCryptoBackend> {
    config: SealConfig,
    signer: Signer<B>,
    verifier: Verifier<B>,
}

impl Default for Sealer {
    fn default() -> Self {
        Self::new(RustCryptoBackend, SealConfig::default())
    }
}

impl<B: CryptoBackend + Clone> Sealer<B> {
    pub fn new(backend: B, config: SealConfig) -> Self {
        let keys = KeyManager::new(backend);
        Self {
            config,
            signer: Signer::from_key_manager(keys.clone()),
            verifier: Verifier::from_key_manager(keys),
        }
    }
}

impl<B: CryptoBackend> Sealer<B> {
    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    pub fn key_manager(&self) -> &KeyManager<B> {
        self.signer.key_manager()
    }

    pub fn signer(&self) -> &Signer<B> {
        &self.signer
    }

    pub fn verifier(&self) -> &Verifier<B> {
        &self.verifier
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate a key pair for the configured algorithm.
    pub fn generate_key_pair(&self) -> Result<KeyPair<B>> {
        Ok(self.key_manager().generate(self.config.algorithm)?)
    }

    pub fn export_pem(&self, key_pair: &KeyPair<B>) -> Result<PemKeyPair> {
        Ok(self.key_manager().export_pem(key_pair)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sealing
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a checksum (when configured) and sign.
    ///
    /// With `embed_public_key` set and no public key given, the public key
    /// is derived from the private key.
    pub fn seal(
        &self,
        document: &Document,
        private_key: impl Into<KeyMaterial<B::PrivateKey>>,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> Result<Document> {
        let algorithm = self.config.algorithm;
        let keys = self.key_manager();
        let private_key = keys.resolve_private(private_key.into(), algorithm)?;

        let embedded = match (self.config.embed_public_key, public_key) {
            (false, _) => None,
            (true, Some(key)) => Some(key),
            (true, None) => Some(KeyMaterial::Native(
                keys.backend().public_key_of(&private_key),
            )),
        };

        let mut options = SignOptions::new().include_timestamp(self.config.include_timestamp);
        options.public_key = embedded;
        options.key_id = self.config.key_id.clone();

        let base = if self.config.add_checksum {
            add_checksum(document)?
        } else {
            document.clone()
        };

        let sealed = self
            .signer
            .sign(&base, KeyMaterial::Native(private_key), algorithm, &options)?;
        tracing::debug!(%algorithm, checksum = self.config.add_checksum, "sealed document");
        Ok(sealed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify the signature, pinning the algorithm when configured.
    pub fn verify(
        &self,
        document: &Document,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> VerificationResult {
        self.verifier.verify(document, &self.verify_options(public_key))
    }

    pub fn verify_batch(
        &self,
        documents: &[Document],
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> Vec<VerificationResult> {
        self.verifier
            .verify_batch(documents, &self.verify_options(public_key))
    }

    /// Report on both the checksum and the signature.
    pub fn inspect(
        &self,
        document: &Document,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> Result<SealReport> {
        Ok(SealReport {
            checksum: verify_checksum(document)?,
            signature: self.verify(document, public_key),
        })
    }

    fn verify_options(
        &self,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> VerifyOptions<B::PublicKey> {
        VerifyOptions {
            public_key,
            expected_algorithm: self.config.pin_algorithm.then_some(self.config.algorithm),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Async wrappers
// ─────────────────────────────────────────────────────────────────────────────

impl<B: CryptoBackend + Clone + 'static> Sealer<B> {
    /// [`generate_key_pair`](Self::generate_key_pair) on a blocking worker.
    pub async fn generate_key_pair_async(&self) -> Result<KeyPair<B>> {
        let this = self.clone();
        run_blocking(move || this.generate_key_pair()).await
    }

    /// [`seal`](Self::seal) on a blocking worker.
    pub async fn seal_async(
        &self,
        document: Document,
        private_key: KeyMaterial<B::PrivateKey>,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> Result<Document> {
        let this = self.clone();
        run_blocking(move || this.seal(&document, private_key, public_key)).await
    }

    /// [`verify`](Self::verify) on a blocking worker.
    pub async fn verify_async(
        &self,
        document: Document,
        public_key: Option<KeyMaterial<B::PublicKey>>,
    ) -> Result<VerificationResult> {
        let this = self.clone();
        run_blocking(move || Ok(this.verify(&document, public_key))).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SealError::TaskFailed(e.to_string()))?
}

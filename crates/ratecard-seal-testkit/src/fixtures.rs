//! Test fixtures and helpers.
//!
//! Key pairs are generated once per algorithm and shared across tests in
//! the same process. RSA generation dominates test time otherwise.

use std::sync::OnceLock;

use serde_json::json;

use ratecard_seal_core::Document;
use ratecard_seal_crypto::{
    Algorithm, KeyManager, KeyPair, PemKeyPair, RustCryptoBackend, SignOptions, Signer,
    VerificationResult, Verifier,
};

static PAIRS: [OnceLock<(KeyPair, PemKeyPair)>; 6] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

fn slot(algorithm: Algorithm) -> usize {
    match algorithm {
        Algorithm::RS256 => 0,
        Algorithm::RS384 => 1,
        Algorithm::RS512 => 2,
        Algorithm::ES256 => 3,
        Algorithm::ES384 => 4,
        Algorithm::ES512 => 5,
    }
}

fn shared(algorithm: Algorithm) -> &'static (KeyPair, PemKeyPair) {
    PAIRS[slot(algorithm)].get_or_init(|| {
        let keys = KeyManager::new(RustCryptoBackend);
        let pair = keys.generate(algorithm).expect("key generation");
        let pem = keys.export_pem(&pair).expect("key export");
        (pair, pem)
    })
}

/// Shared native key pair for an algorithm.
pub fn key_pair(algorithm: Algorithm) -> &'static KeyPair {
    &shared(algorithm).0
}

/// Shared PEM key pair for an algorithm (same keys as [`key_pair`]).
pub fn pem_key_pair(algorithm: Algorithm) -> &'static PemKeyPair {
    &shared(algorithm).1
}

/// The minimal rate card used throughout the tests.
pub fn sample_rate_card() -> Document {
    Document::from_value(json!({
        "name": "Test",
        "schema_version": "1.0.0",
        "version": "1.0",
        "date": "2026-01-12",
        "cards": {
            "default": {
                "name": "Default",
                "type": "termination",
                "currency": "USD",
                "endpoint": "default"
            }
        }
    }))
    .expect("sample rate card is an object")
}

/// A fuller rate card with rates, nested metadata, and numbers.
pub fn detailed_rate_card() -> Document {
    Document::from_value(json!({
        "name": "Wholesale Voice",
        "schema_version": "1.0.0",
        "version": "2.3",
        "date": "2026-03-01",
        "metadata": {"author": "carrier-ops", "notes": "quarterly refresh"},
        "cards": {
            "termination": {
                "name": "Termination",
                "type": "termination",
                "currency": "EUR",
                "endpoint": "sip.carrier.example",
                "rates": [
                    {"prefix": "44", "rate": 0.012, "increment": 60},
                    {"prefix": "4420", "rate": 0.0085, "increment": 1},
                    {"prefix": "1", "rate": 0.0045, "increment": 6}
                ]
            },
            "origination": {
                "name": "Origination",
                "type": "origination",
                "currency": "EUR",
                "endpoint": "default",
                "rates": []
            }
        }
    }))
    .expect("detailed rate card is an object")
}

/// A signer and verifier sharing one pre-generated key pair.
pub struct SealFixture {
    pub algorithm: Algorithm,
    pub signer: Signer,
    pub verifier: Verifier,
}

impl SealFixture {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            signer: Signer::new(RustCryptoBackend),
            verifier: Verifier::new(RustCryptoBackend),
        }
    }

    pub fn key_pair(&self) -> &'static KeyPair {
        key_pair(self.algorithm)
    }

    pub fn pem(&self) -> &'static PemKeyPair {
        pem_key_pair(self.algorithm)
    }

    /// Sign without embedding the public key.
    pub fn sign(&self, document: &Document) -> Document {
        self.sign_with(document, &SignOptions::new())
    }

    /// Sign with the public key embedded.
    pub fn sign_embedded(&self, document: &Document) -> Document {
        let options = SignOptions::new().public_key(self.key_pair().public_key.clone());
        self.sign_with(document, &options)
    }

    pub fn sign_with(&self, document: &Document, options: &SignOptions) -> Document {
        self.signer
            .sign(
                document,
                self.key_pair().private_key.clone(),
                self.algorithm,
                options,
            )
            .expect("signing with a matching key")
    }

    /// Verify with the fixture's public key.
    pub fn verify(&self, document: &Document) -> VerificationResult {
        self.verifier
            .verify_with_key(document, self.key_pair().public_key.clone())
    }
}

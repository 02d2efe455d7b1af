//! # Rate Card Seal
//!
//! Tamper-evidence and authenticity for rate card documents exchanged
//! between carriers and customers.
//!
//! ## Overview
//!
//! - **Canonical form**: sorted-key compact JSON, independent of field order
//! - **Checksum**: SHA-256 of the canonical form at `metadata.checksum`
//! - **Signature**: RSA or ECDSA record at `metadata.signature`
//! - **Certificates**: a key pair bound to a subject and validity window
//!
//! Neither integrity field takes part in its own computation, so a
//! document can be checksummed and signed in either order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ratecard_seal::{Document, Sealer};
//!
//! let sealer: Sealer = Sealer::default();
//! let pair = sealer.generate_key_pair().unwrap();
//!
//! let card = Document::from_json(r#"{"name":"Test","version":"1.0"}"#).unwrap();
//! let sealed = sealer.seal(&card, pair.private_key, None).unwrap();
//!
//! let report = sealer.inspect(&sealed, None).unwrap();
//! assert!(report.is_intact());
//! ```
//!
//! ## Re-exports
//!
//! - `ratecard_seal::core` - Documents, canonicalization, checksums
//! - `ratecard_seal::crypto` - Keys, signing, verification, certificates

pub mod config;
pub mod error;
pub mod sealer;

pub use ratecard_seal_core as core;
pub use ratecard_seal_crypto as crypto;

pub use config::SealConfig;
pub use error::{Result, SealError};
pub use sealer::{SealReport, Sealer};

pub use ratecard_seal_core::{
    add_checksum, canonical_bytes, canonical_string, compute_checksum, remove_checksum,
    verify_checksum, ChecksumVerification, CoreError, Document, Sha256Hash, CHECKSUM_KEY,
    METADATA_KEY, SIGNATURE_KEY,
};
pub use ratecard_seal_crypto::{
    Algorithm, Certificate, CertificateIssuer, CertificateRequest, CryptoBackend, CryptoError,
    IssuedCertificate, KeyError, KeyManager, KeyMaterial, KeyPair, PemKeyPair, PrivateKey,
    PublicKey, RustCryptoBackend, SignOptions, SignatureInfo, Signer, VerificationResult,
    VerifyError, VerifyOptions, Verifier,
};

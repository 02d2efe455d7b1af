//! # Rate Card Seal Crypto
//!
//! Asymmetric keys, embedded signatures, and minimal certificates for rate
//! card documents.
//!
//! ## Key Types
//!
//! - [`Algorithm`] - RS256/384/512 and ES256/384/512
//! - [`CryptoBackend`] - Capability interface over the primitives
//! - [`KeyManager`] - Generate, export, and import key pairs
//! - [`Signer`] - Embed a signature record at `metadata.signature`
//! - [`Verifier`] - Check an embedded record, never failing
//! - [`CertificateIssuer`] - Key pair plus chain-less certificate
//!
//! ## Signing
//!
//! The signed message is the canonical form of the document with
//! `metadata.signature` removed. Since the canonical form also excludes
//! `metadata.checksum`, a checksum can be added before or after signing.
//!
//! ```rust,no_run
//! use ratecard_seal_core::Document;
//! use ratecard_seal_crypto::{Algorithm, RustCryptoBackend, SignOptions, Signer, Verifier};
//!
//! let signer = Signer::new(RustCryptoBackend);
//! let pair = signer.key_manager().generate(Algorithm::ES256).unwrap();
//! let doc = Document::from_json(r#"{"name":"Test"}"#).unwrap();
//!
//! let signed = signer
//!     .sign(&doc, pair.private_key, Algorithm::ES256, &SignOptions::new())
//!     .unwrap();
//! let result = Verifier::new(RustCryptoBackend).verify_with_key(&signed, pair.public_key);
//! assert!(result.valid);
//! ```

pub mod algorithm;
pub mod backend;
pub mod certificate;
pub mod error;
pub mod keys;
pub mod record;
pub mod signer;
pub mod verifier;

pub use algorithm::{Algorithm, Curve, HashAlgorithm, KeyFamily};
pub use backend::{CryptoBackend, PrivateKey, PublicKey, RustCryptoBackend};
pub use certificate::{Certificate, CertificateIssuer, CertificateRequest, IssuedCertificate};
pub use error::{CryptoError, KeyError, Result};
pub use keys::{pem_body, KeyManager, KeyMaterial, KeyPair, PemKeyPair};
pub use record::SignatureInfo;
pub use signer::{SignOptions, Signer};
pub use verifier::{VerificationResult, VerifyError, VerifyOptions, Verifier};

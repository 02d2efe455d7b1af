//! # Rate Card Seal Testkit
//!
//! Testing utilities for Rate Card Seal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Documents with their expected canonical text and checksum
//! - **Generators**: Proptest strategies for JSON documents and rate cards
//! - **Fixtures**: Sample rate cards and shared per-algorithm key pairs
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ratecard_seal_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, checksum) in verify_all_vectors() {
//!     assert!(matches, "{name}: {checksum}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ratecard_seal_core::canonical_bytes;
//! use ratecard_seal_testkit::generators::{document, permute_keys};
//!
//! proptest! {
//!     #[test]
//!     fn canonical_ignores_key_order(doc in document(), by in 0usize..8) {
//!         let permuted = permute_keys(&doc, by);
//!         prop_assert_eq!(canonical_bytes(&doc).unwrap(), canonical_bytes(&permuted).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use ratecard_seal_crypto::Algorithm;
//! use ratecard_seal_testkit::fixtures::{sample_rate_card, SealFixture};
//!
//! let fixture = SealFixture::new(Algorithm::ES256);
//! let signed = fixture.sign(&sample_rate_card());
//! assert!(fixture.verify(&signed).valid);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{detailed_rate_card, key_pair, pem_key_pair, sample_rate_card, SealFixture};
pub use generators::{document, json_value, permute_keys, rate_card};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, SAMPLE_CHECKSUM, TAMPERED_CHECKSUM};

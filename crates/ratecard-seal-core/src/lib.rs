//! # Rate Card Seal Core
//!
//! Pure primitives for Rate Card Seal: documents, canonicalization, and
//! checksums.
//!
//! This crate contains no key material and no I/O. It is pure computation
//! over JSON documents.
//!
//! ## Key Types
//!
//! - [`Document`] - A JSON object carrying optional integrity metadata
//! - [`Sha256Hash`] - Digest of a canonical form
//! - [`ChecksumVerification`] - Result of checking `metadata.checksum`
//!
//! ## Canonicalization
//!
//! Documents are hashed and signed over sorted-key compact JSON with the
//! integrity fields removed. See [`canonical`] module.

pub mod canonical;
pub mod checksum;
pub mod document;
pub mod error;

pub use canonical::{canonical_bytes, canonical_bytes_of, canonical_string, canonical_value_bytes};
pub use checksum::{
    add_checksum, compute_checksum, remove_checksum, verify_checksum, ChecksumVerification,
    Sha256Hash,
};
pub use document::{Document, CHECKSUM_KEY, METADATA_KEY, SIGNATURE_KEY};
pub use error::{CoreError, Result};

//! Crypto backends.
//!
//! [`CryptoBackend`] is the capability surface the rest of the crate depends
//! on: generate, import, export, sign, verify, digest. Key types are
//! associated types, so signers and verifiers never name a specific
//! library's key objects.
//!
//! [`RustCryptoBackend`] implements it with the RustCrypto `rsa`, `p256`,
//! `p384` and `p521` crates.

use rand::rngs::OsRng;
use rsa::pkcs1v15;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use signature::{SignatureEncoding, Signer, Verifier};
use std::fmt;

use ratecard_seal_core::Sha256Hash;

use crate::algorithm::{Algorithm, Curve, HashAlgorithm, KeyFamily, RSA_KEY_BITS};
use crate::error::{CryptoError, KeyError, Result};

/// Capability interface over a native crypto library.
pub trait CryptoBackend: Send + Sync {
    /// Key usable only for signing.
    type PrivateKey: Clone + Send + Sync + fmt::Debug + 'static;
    /// Key usable only for verifying.
    type PublicKey: Clone + Send + Sync + fmt::Debug + 'static;

    /// Generate a fresh key pair for the algorithm.
    fn generate_key_pair(
        &self,
        algorithm: Algorithm,
    ) -> Result<(Self::PrivateKey, Self::PublicKey)>;

    /// Import a PKCS#8 PEM private key.
    fn import_private_key(&self, pem: &str, algorithm: Algorithm) -> Result<Self::PrivateKey>;

    /// Import an SPKI PEM public key.
    fn import_public_key(&self, pem: &str, algorithm: Algorithm) -> Result<Self::PublicKey>;

    /// Export a private key as PKCS#8 PEM.
    fn export_private_key(&self, key: &Self::PrivateKey) -> Result<String>;

    /// Export a public key as SPKI PEM.
    fn export_public_key(&self, key: &Self::PublicKey) -> Result<String>;

    /// Derive the public half of a private key.
    fn public_key_of(&self, key: &Self::PrivateKey) -> Self::PublicKey;

    /// Fail with [`KeyError::AlgorithmMismatch`] unless the key fits the algorithm.
    fn check_private_key(&self, key: &Self::PrivateKey, algorithm: Algorithm) -> Result<()>;

    /// Fail with [`KeyError::AlgorithmMismatch`] unless the key fits the algorithm.
    fn check_public_key(&self, key: &Self::PublicKey, algorithm: Algorithm) -> Result<()>;

    /// Sign a message, returning raw signature bytes.
    fn sign(&self, key: &Self::PrivateKey, algorithm: Algorithm, message: &[u8])
        -> Result<Vec<u8>>;

    /// Verify raw signature bytes over a message.
    ///
    /// `Ok(false)` means a well-formed signature that does not match.
    fn verify(
        &self,
        key: &Self::PublicKey,
        algorithm: Algorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool>;

    /// SHA-256 digest.
    fn digest(&self, data: &[u8]) -> Sha256Hash;
}

/// A private key held by [`RustCryptoBackend`].
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(Box<RsaPrivateKey>),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

/// A public key held by [`RustCryptoBackend`].
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl PrivateKey {
    /// Short description of the key type.
    pub fn kind(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => "RSA",
            PrivateKey::P256(_) => "EC P-256",
            PrivateKey::P384(_) => "EC P-384",
            PrivateKey::P521(_) => "EC P-521",
        }
    }

    fn matches(&self, algorithm: Algorithm) -> bool {
        matches!(
            (self, algorithm.family(), algorithm.curve()),
            (PrivateKey::Rsa(_), KeyFamily::Rsa, _)
                | (PrivateKey::P256(_), _, Some(Curve::P256))
                | (PrivateKey::P384(_), _, Some(Curve::P384))
                | (PrivateKey::P521(_), _, Some(Curve::P521))
        )
    }
}

impl PublicKey {
    /// Short description of the key type.
    pub fn kind(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            PublicKey::P256(_) => "EC P-256",
            PublicKey::P384(_) => "EC P-384",
            PublicKey::P521(_) => "EC P-521",
        }
    }

    fn matches(&self, algorithm: Algorithm) -> bool {
        matches!(
            (self, algorithm.family(), algorithm.curve()),
            (PublicKey::Rsa(_), KeyFamily::Rsa, _)
                | (PublicKey::P256(_), _, Some(Curve::P256))
                | (PublicKey::P384(_), _, Some(Curve::P384))
                | (PublicKey::P521(_), _, Some(Curve::P521))
        )
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({})", self.kind())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.kind())
    }
}

/// Pure-Rust backend built on the RustCrypto crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoBackend;

impl RustCryptoBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CryptoBackend for RustCryptoBackend {
    type PrivateKey = PrivateKey;
    type PublicKey = PublicKey;

    fn generate_key_pair(&self, algorithm: Algorithm) -> Result<(PrivateKey, PublicKey)> {
        let pair = match algorithm.curve() {
            None => {
                let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
                    .map_err(|e| KeyError::Generation(e.to_string()))?;
                let public = RsaPublicKey::from(&private);
                (PrivateKey::Rsa(Box::new(private)), PublicKey::Rsa(public))
            }
            Some(Curve::P256) => {
                let secret = p256::SecretKey::random(&mut OsRng);
                let public = secret.public_key();
                (PrivateKey::P256(secret), PublicKey::P256(public))
            }
            Some(Curve::P384) => {
                let secret = p384::SecretKey::random(&mut OsRng);
                let public = secret.public_key();
                (PrivateKey::P384(secret), PublicKey::P384(public))
            }
            Some(Curve::P521) => {
                let secret = p521::SecretKey::random(&mut OsRng);
                let public = secret.public_key();
                (PrivateKey::P521(secret), PublicKey::P521(public))
            }
        };
        Ok(pair)
    }

    fn import_private_key(&self, pem: &str, algorithm: Algorithm) -> Result<PrivateKey> {
        let decoded = match algorithm.curve() {
            None => RsaPrivateKey::from_pkcs8_pem(pem).map(|k| PrivateKey::Rsa(Box::new(k))),
            Some(Curve::P256) => p256::SecretKey::from_pkcs8_pem(pem).map(PrivateKey::P256),
            Some(Curve::P384) => p384::SecretKey::from_pkcs8_pem(pem).map(PrivateKey::P384),
            Some(Curve::P521) => p521::SecretKey::from_pkcs8_pem(pem).map(PrivateKey::P521),
        };
        decoded.map_err(|e| match probe_private_kind(pem) {
            Some(key) => CryptoError::from(KeyError::AlgorithmMismatch { algorithm, key }),
            None => CryptoError::from(KeyError::MalformedKey(e.to_string())),
        })
    }

    fn import_public_key(&self, pem: &str, algorithm: Algorithm) -> Result<PublicKey> {
        let decoded = match algorithm.curve() {
            None => RsaPublicKey::from_public_key_pem(pem).map(PublicKey::Rsa),
            Some(Curve::P256) => p256::PublicKey::from_public_key_pem(pem).map(PublicKey::P256),
            Some(Curve::P384) => p384::PublicKey::from_public_key_pem(pem).map(PublicKey::P384),
            Some(Curve::P521) => p521::PublicKey::from_public_key_pem(pem).map(PublicKey::P521),
        };
        decoded.map_err(|e| match probe_public_kind(pem) {
            Some(key) => CryptoError::from(KeyError::AlgorithmMismatch { algorithm, key }),
            None => CryptoError::from(KeyError::MalformedKey(e.to_string())),
        })
    }

    fn export_private_key(&self, key: &PrivateKey) -> Result<String> {
        let pem = match key {
            PrivateKey::Rsa(k) => k.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::P256(k) => k.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::P384(k) => k.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::P521(k) => k.to_pkcs8_pem(LineEnding::LF),
        }
        .map_err(|e| KeyError::Export(e.to_string()))?;
        Ok(pem.to_string())
    }

    fn export_public_key(&self, key: &PublicKey) -> Result<String> {
        let pem = match key {
            PublicKey::Rsa(k) => k.to_public_key_pem(LineEnding::LF),
            PublicKey::P256(k) => k.to_public_key_pem(LineEnding::LF),
            PublicKey::P384(k) => k.to_public_key_pem(LineEnding::LF),
            PublicKey::P521(k) => k.to_public_key_pem(LineEnding::LF),
        }
        .map_err(|e| KeyError::Export(e.to_string()))?;
        Ok(pem)
    }

    fn public_key_of(&self, key: &PrivateKey) -> PublicKey {
        match key {
            PrivateKey::Rsa(k) => PublicKey::Rsa(RsaPublicKey::from(&**k)),
            PrivateKey::P256(k) => PublicKey::P256(k.public_key()),
            PrivateKey::P384(k) => PublicKey::P384(k.public_key()),
            PrivateKey::P521(k) => PublicKey::P521(k.public_key()),
        }
    }

    fn check_private_key(&self, key: &PrivateKey, algorithm: Algorithm) -> Result<()> {
        if key.matches(algorithm) {
            Ok(())
        } else {
            Err(KeyError::AlgorithmMismatch {
                algorithm,
                key: key.kind(),
            }
            .into())
        }
    }

    fn check_public_key(&self, key: &PublicKey, algorithm: Algorithm) -> Result<()> {
        if key.matches(algorithm) {
            Ok(())
        } else {
            Err(KeyError::AlgorithmMismatch {
                algorithm,
                key: key.kind(),
            }
            .into())
        }
    }

    fn sign(&self, key: &PrivateKey, algorithm: Algorithm, message: &[u8]) -> Result<Vec<u8>> {
        self.check_private_key(key, algorithm)?;
        match key {
            PrivateKey::Rsa(k) => rsa_sign(k, algorithm.hash(), message),
            PrivateKey::P256(k) => {
                let signing_key = p256::ecdsa::SigningKey::from(k);
                let sig: p256::ecdsa::Signature = signing_key.try_sign(message).map_err(op_err)?;
                Ok(sig.to_bytes().to_vec())
            }
            PrivateKey::P384(k) => {
                let signing_key = p384::ecdsa::SigningKey::from(k);
                let sig: p384::ecdsa::Signature = signing_key.try_sign(message).map_err(op_err)?;
                Ok(sig.to_bytes().to_vec())
            }
            PrivateKey::P521(k) => {
                let signing_key =
                    p521::ecdsa::SigningKey::from_bytes(&k.to_bytes()).map_err(op_err)?;
                let sig: p521::ecdsa::Signature = signing_key.try_sign(message).map_err(op_err)?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }

    fn verify(
        &self,
        key: &PublicKey,
        algorithm: Algorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        self.check_public_key(key, algorithm)?;
        match key {
            PublicKey::Rsa(k) => rsa_verify(k, algorithm.hash(), message, signature),
            PublicKey::P256(k) => {
                let Ok(sig) = p256::ecdsa::Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let verifying_key = p256::ecdsa::VerifyingKey::from(k);
                Ok(verifying_key.verify(message, &sig).is_ok())
            }
            PublicKey::P384(k) => {
                let Ok(sig) = p384::ecdsa::Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let verifying_key = p384::ecdsa::VerifyingKey::from(k);
                Ok(verifying_key.verify(message, &sig).is_ok())
            }
            PublicKey::P521(k) => {
                let Ok(sig) = p521::ecdsa::Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let verifying_key =
                    p521::ecdsa::VerifyingKey::from_affine(*k.as_affine()).map_err(op_err)?;
                Ok(verifying_key.verify(message, &sig).is_ok())
            }
        }
    }

    fn digest(&self, data: &[u8]) -> Sha256Hash {
        Sha256Hash::hash(data)
    }
}

fn rsa_sign(key: &RsaPrivateKey, hash: HashAlgorithm, message: &[u8]) -> Result<Vec<u8>> {
    let sig = match hash {
        HashAlgorithm::Sha256 => pkcs1v15::SigningKey::<Sha256>::new(key.clone()).try_sign(message),
        HashAlgorithm::Sha384 => pkcs1v15::SigningKey::<Sha384>::new(key.clone()).try_sign(message),
        HashAlgorithm::Sha512 => pkcs1v15::SigningKey::<Sha512>::new(key.clone()).try_sign(message),
    }
    .map_err(op_err)?;
    Ok(sig.to_vec())
}

fn rsa_verify(
    key: &RsaPublicKey,
    hash: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let Ok(sig) = pkcs1v15::Signature::try_from(signature) else {
        return Ok(false);
    };
    let ok = match hash {
        HashAlgorithm::Sha256 => pkcs1v15::VerifyingKey::<Sha256>::new(key.clone())
            .verify(message, &sig)
            .is_ok(),
        HashAlgorithm::Sha384 => pkcs1v15::VerifyingKey::<Sha384>::new(key.clone())
            .verify(message, &sig)
            .is_ok(),
        HashAlgorithm::Sha512 => pkcs1v15::VerifyingKey::<Sha512>::new(key.clone())
            .verify(message, &sig)
            .is_ok(),
    };
    Ok(ok)
}

fn op_err(e: impl fmt::Display) -> CryptoError {
    CryptoError::Operation(e.to_string())
}

/// Identify the key type of a PKCS#8 PEM that failed to import.
fn probe_private_kind(pem: &str) -> Option<&'static str> {
    if RsaPrivateKey::from_pkcs8_pem(pem).is_ok() {
        Some("RSA")
    } else if p256::SecretKey::from_pkcs8_pem(pem).is_ok() {
        Some("EC P-256")
    } else if p384::SecretKey::from_pkcs8_pem(pem).is_ok() {
        Some("EC P-384")
    } else if p521::SecretKey::from_pkcs8_pem(pem).is_ok() {
        Some("EC P-521")
    } else {
        None
    }
}

/// Identify the key type of an SPKI PEM that failed to import.
fn probe_public_kind(pem: &str) -> Option<&'static str> {
    if RsaPublicKey::from_public_key_pem(pem).is_ok() {
        Some("RSA")
    } else if p256::PublicKey::from_public_key_pem(pem).is_ok() {
        Some("EC P-256")
    } else if p384::PublicKey::from_public_key_pem(pem).is_ok() {
        Some("EC P-384")
    } else if p521::PublicKey::from_public_key_pem(pem).is_ok() {
        Some("EC P-521")
    } else {
        None
    }
}

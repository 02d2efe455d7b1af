//! Signature algorithm identifiers.
//!
//! | id | family | hash |
//! |---|---|---|
//! | RS256/RS384/RS512 | RSA PKCS#1 v1.5, 2048-bit, e = 65537 | SHA-256/384/512 |
//! | ES256/ES384/ES512 | ECDSA P-256/P-384/P-521 | SHA-256/384/512 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// RSA modulus size for generated keys.
pub const RSA_KEY_BITS: usize = 2048;

/// RSA public exponent (fixed by key generation).
pub const RSA_PUBLIC_EXPONENT: u64 = 65537;

/// A supported signature algorithm. Identifiers are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
}

/// Algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Ecdsa,
}

/// Hash paired with an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

/// Elliptic curve paired with an ECDSA algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Algorithm {
    /// All supported algorithms.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// The wire identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    pub const fn family(&self) -> KeyFamily {
        match self {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => KeyFamily::Rsa,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => KeyFamily::Ecdsa,
        }
    }

    pub const fn hash(&self) -> HashAlgorithm {
        match self {
            Algorithm::RS256 | Algorithm::ES256 => HashAlgorithm::Sha256,
            Algorithm::RS384 | Algorithm::ES384 => HashAlgorithm::Sha384,
            Algorithm::RS512 | Algorithm::ES512 => HashAlgorithm::Sha512,
        }
    }

    /// The curve for ECDSA algorithms, `None` for RSA.
    pub const fn curve(&self) -> Option<Curve> {
        match self {
            Algorithm::ES256 => Some(Curve::P256),
            Algorithm::ES384 => Some(Curve::P384),
            Algorithm::ES512 => Some(Curve::P521),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| KeyError::UnsupportedAlgorithm(s.to_string()))
    }
}

/*
[INPUT]:  Algorithm identifier and raw secret bytes
[OUTPUT]: Keyed HMAC digests over arbitrary messages
[POS]:    Auth layer - keyed hashing primitive for request signing
[UPDATE]: When supporting additional digest algorithms
*/

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Construction-time failures of an [`HmacSigner`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The algorithm identifier is not a supported HMAC digest
    #[error("Unsupported HMAC algorithm: {0}")]
    InvalidAlgorithm(String),

    /// The key material cannot be used to key the MAC
    #[error("Invalid HMAC key: {0}")]
    InvalidKey(String),
}

/// Digest algorithms available for keyed hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HmacAlgorithm {
    /// Canonical identifier, e.g. `HmacSHA512`
    pub fn as_str(&self) -> &'static str {
        match self {
            HmacAlgorithm::Sha256 => "HmacSHA256",
            HmacAlgorithm::Sha384 => "HmacSHA384",
            HmacAlgorithm::Sha512 => "HmacSHA512",
        }
    }

    /// Length in bytes of the produced MAC
    pub fn output_len(&self) -> usize {
        match self {
            HmacAlgorithm::Sha256 => 32,
            HmacAlgorithm::Sha384 => 48,
            HmacAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = SignerError;

    /// Accepts `HmacSHA512`, `hmac-sha512`, `HMAC_SHA512` and bare `sha512`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        let digest = normalized.strip_prefix("hmac").unwrap_or(&normalized);

        match digest {
            "sha256" => Ok(HmacAlgorithm::Sha256),
            "sha384" => Ok(HmacAlgorithm::Sha384),
            "sha512" => Ok(HmacAlgorithm::Sha512),
            _ => Err(SignerError::InvalidAlgorithm(s.to_string())),
        }
    }
}

#[derive(Clone)]
enum KeyedMac {
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

/// HMAC signer keyed once at construction
///
/// Each call to [`HmacSigner::sign`] works on a copy of the keyed state, so a
/// signer can be shared between threads without locking.
#[derive(Clone)]
pub struct HmacSigner {
    algorithm: HmacAlgorithm,
    mac: KeyedMac,
}

impl HmacSigner {
    /// Key a signer for the given algorithm
    pub fn new(algorithm: HmacAlgorithm, secret: &[u8]) -> Result<Self, SignerError> {
        if secret.is_empty() {
            return Err(SignerError::InvalidKey("secret is empty".to_string()));
        }

        let invalid_key = |e: hmac::digest::InvalidLength| SignerError::InvalidKey(e.to_string());
        let mac = match algorithm {
            HmacAlgorithm::Sha256 => {
                KeyedMac::Sha256(HmacSha256::new_from_slice(secret).map_err(invalid_key)?)
            }
            HmacAlgorithm::Sha384 => {
                KeyedMac::Sha384(HmacSha384::new_from_slice(secret).map_err(invalid_key)?)
            }
            HmacAlgorithm::Sha512 => {
                KeyedMac::Sha512(HmacSha512::new_from_slice(secret).map_err(invalid_key)?)
            }
        };

        Ok(Self { algorithm, mac })
    }

    /// Parse an algorithm identifier and key a signer in one step
    pub fn from_identifier(algorithm: &str, secret: &[u8]) -> Result<Self, SignerError> {
        Self::new(algorithm.parse()?, secret)
    }

    pub fn algorithm(&self) -> HmacAlgorithm {
        self.algorithm
    }

    /// Compute the MAC of `message`
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match &self.mac {
            KeyedMac::Sha256(mac) => {
                let mut mac = mac.clone();
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            KeyedMac::Sha384(mac) => {
                let mut mac = mac.clone();
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            KeyedMac::Sha512(mac) => {
                let mut mac = mac.clone();
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
        }
    }
}

// Keyed state holds the secret; only the algorithm is printed.
impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

//! Operator seals over driips.
//!
//! A [`Seal`] binds a driip to the operator that issued it: the seal carries
//! the canonical SHA-256 hash of the driip and an ed25519 signature over
//! that hash. Seal genuineness is judged by the `Validator` collaborator;
//! this module provides the signing and verification primitives.

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::DriipHash;

/// An operator seal: driip hash plus ed25519 signature over the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// Canonical hash of the sealed driip.
    pub hash: DriipHash,
    /// Ed25519 signature over `hash` from the operator key.
    pub signature: Vec<u8>,
    /// When the seal was issued.
    pub sealed_at: DateTime<Utc>,
}

impl Seal {
    /// Sign a driip hash with the operator key.
    #[must_use]
    pub fn sign(hash: DriipHash, key: &SigningKey) -> Self {
        let signature = key.sign(hash.as_bytes());
        Self {
            hash,
            signature: signature.to_bytes().to_vec(),
            sealed_at: Utc::now(),
        }
    }

    /// Verify this seal against the expected driip hash and operator key.
    ///
    /// Returns `false` if the hash does not match, the signature bytes are
    /// malformed, or the signature does not verify.
    #[must_use]
    pub fn verify(&self, expected: &DriipHash, key: &VerifyingKey) -> bool {
        if self.hash != *expected {
            return false;
        }
        let Ok(signature) = Signature::from_slice(&self.signature) else {
            return false;
        };
        key.verify(expected.as_bytes(), &signature).is_ok()
    }
}

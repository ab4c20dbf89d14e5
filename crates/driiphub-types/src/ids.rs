//! Identifiers used throughout DriipHub.
//!
//! Wallets and currencies are 20-byte addresses; driip hashes are SHA-256
//! digests over the canonical driip encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WalletId
// ---------------------------------------------------------------------------

/// A wallet address (20 bytes, hex-displayed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct WalletId(pub [u8; 20]);

impl WalletId {
    /// The null address.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive a wallet address from an ed25519 verifying key
    /// (SHA-256 of the key, truncated to the last 20 bytes).
    #[must_use]
    pub fn from_verifying_key(key: &ed25519_dalek::VerifyingKey) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..32]);
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Random wallet address for tests.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// A currency handle (20-byte token contract address).
///
/// The zero value designates the native asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Currency(pub [u8; 20]);

impl Currency {
    /// The native asset (zero handle).
    pub const NATIVE: Self = Self([0u8; 20]);

    #[must_use]
    pub fn token(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this handle designates the native asset.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Random token currency for tests (never the native handle).
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random_token() -> Self {
        let mut bytes: [u8; 20] = rand::random();
        bytes[0] |= 1;
        Self(bytes)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "0x{}", hex::encode(self.0))
        }
    }
}

// ---------------------------------------------------------------------------
// DriipHash
// ---------------------------------------------------------------------------

/// SHA-256 digest over the canonical encoding of a driip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DriipHash(pub [u8; 32]);

impl DriipHash {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DriipHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

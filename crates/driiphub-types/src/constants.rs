//! System-wide constants for the DriipHub settlement engine.

/// Maximum decimal precision for monetary amounts (18 decimal places).
pub const AMOUNT_PRECISION: u32 = 18;

/// Block height the first accrual period opens at.
pub const GENESIS_BLOCK: u64 = 0;

/// Ed25519 signature length in bytes, as carried by a seal.
pub const SEAL_SIGNATURE_LEN: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "DriipHub";

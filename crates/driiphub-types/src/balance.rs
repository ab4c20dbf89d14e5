//! Balance tracking types for the DriipHub reserve model.
//!
//! Every wallet has an `active` balance (claimable against the aggregate
//! pool) and a `staged` balance (withdrawable). Deposits are an append-only
//! per-wallet sequence ordered by block height.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;

/// A single balance entry for a (wallet, currency) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Claimable against the aggregate pool.
    pub active: Decimal,
    /// Staged for withdrawal.
    pub staged: Decimal,
}

impl BalanceEntry {
    /// Create a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Decimal::ZERO,
            staged: Decimal::ZERO,
        }
    }

    /// Total balance (active + staged).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.active + self.staged
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.active.is_zero() && self.staged.is_zero()
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// A deposit into the reserve fund. Index-stable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deposit {
    /// Deposited amount.
    pub amount: Decimal,
    /// Deposited currency (zero handle = native asset).
    pub currency: Currency,
    /// Block height at which the deposit landed.
    pub block_number: u64,
}

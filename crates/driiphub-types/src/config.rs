//! Operational configuration: mode and block-versioned fee schedules.
//!
//! Fee schedules are versioned by effective block height. A lookup at block
//! `b` returns the latest schedule with `effective_block <= b`, so fees are
//! always computed against the schedule in force when the driip was sealed.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operational mode of the settlement system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationalMode {
    /// Normal operation; settlement of any qualified driip is allowed.
    Normal,
    /// Exit mode; only driips at or below the community-agreed max nonce
    /// may settle.
    Exit,
}

impl std::fmt::Display for OperationalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Exit => write!(f, "EXIT"),
        }
    }
}

/// The fee role a party settles under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeRole {
    /// Passive side of a trade.
    TradeMaker,
    /// Aggressive side of a trade.
    TradeTaker,
    /// Sender of a payment.
    Payment,
}

impl std::fmt::Display for FeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TradeMaker => write!(f, "TRADE_MAKER"),
            Self::TradeTaker => write!(f, "TRADE_TAKER"),
            Self::Payment => write!(f, "PAYMENT"),
        }
    }
}

/// A discount bracket: amounts at or above `threshold` have the nominal
/// rate reduced by the fractional `discount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Minimum amount for this bracket to apply.
    pub threshold: Decimal,
    /// Fractional reduction of the nominal rate (e.g. 0.1 = 10% off).
    pub discount: Decimal,
}

/// A fee schedule entry, in force from `effective_block` onwards until
/// superseded by a later entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Block height from which this entry applies.
    pub effective_block: u64,
    /// Flat fee rate applied to the settled amount.
    pub nominal_rate: Decimal,
    /// Discount brackets, checked against the settled amount.
    pub discount_tiers: Vec<DiscountTier>,
    /// Floor for the computed fee.
    pub minimum_fee: Decimal,
}

impl FeeSchedule {
    /// Default trade-maker schedule: 0.1% nominal, 0.0001 minimum.
    #[must_use]
    pub fn default_trade_maker(effective_block: u64) -> Self {
        Self {
            effective_block,
            nominal_rate: Decimal::new(1, 3),
            discount_tiers: Vec::new(),
            minimum_fee: Decimal::new(1, 4),
        }
    }

    /// Default trade-taker schedule: 0.2% nominal, 0.0002 minimum.
    #[must_use]
    pub fn default_trade_taker(effective_block: u64) -> Self {
        Self {
            effective_block,
            nominal_rate: Decimal::new(2, 3),
            discount_tiers: Vec::new(),
            minimum_fee: Decimal::new(2, 4),
        }
    }

    /// Default payment schedule: 0.2% nominal, 0.0002 minimum.
    #[must_use]
    pub fn default_payment(effective_block: u64) -> Self {
        Self {
            effective_block,
            nominal_rate: Decimal::new(2, 3),
            discount_tiers: Vec::new(),
            minimum_fee: Decimal::new(2, 4),
        }
    }
}

/// Mutable configuration held by the settlement engine, swappable only
/// through its authenticated admin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    operational_mode: OperationalMode,
    /// Per-role fee schedules, kept sorted by `effective_block`.
    fee_schedules: HashMap<FeeRole, Vec<FeeSchedule>>,
}

impl Configuration {
    /// Empty configuration in normal mode, with no fee schedules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operational_mode: OperationalMode::Normal,
            fee_schedules: HashMap::new(),
        }
    }

    /// Configuration carrying the default fee schedules from genesis.
    #[must_use]
    pub fn with_default_fees() -> Self {
        let mut config = Self::new();
        config.set_fee_schedule(FeeRole::TradeMaker, FeeSchedule::default_trade_maker(0));
        config.set_fee_schedule(FeeRole::TradeTaker, FeeSchedule::default_trade_taker(0));
        config.set_fee_schedule(FeeRole::Payment, FeeSchedule::default_payment(0));
        config
    }

    /// Whether the system is in exit mode.
    #[must_use]
    pub fn is_operational_mode_exit(&self) -> bool {
        self.operational_mode == OperationalMode::Exit
    }

    /// Switch to exit mode. There is no way back to normal mode.
    pub fn set_operational_mode_exit(&mut self) {
        self.operational_mode = OperationalMode::Exit;
    }

    /// Install a fee schedule entry for a role, keeping entries sorted by
    /// effective block. A later entry for the same block supersedes.
    pub fn set_fee_schedule(&mut self, role: FeeRole, schedule: FeeSchedule) {
        let entries = self.fee_schedules.entry(role).or_default();
        entries.retain(|s| s.effective_block != schedule.effective_block);
        entries.push(schedule);
        entries.sort_by_key(|s| s.effective_block);
    }

    /// The schedule in force at `block_number`: the latest entry with
    /// `effective_block <= block_number`, if any.
    #[must_use]
    pub fn fee_schedule(&self, role: FeeRole, block_number: u64) -> Option<&FeeSchedule> {
        self.fee_schedules
            .get(&role)?
            .iter()
            .rev()
            .find(|s| s.effective_block <= block_number)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

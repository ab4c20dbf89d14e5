//! Seizure registry — wallet forfeitures from disqualified challenges.
//!
//! Seizures are append-only: a wallet, once seized, stays seized. The
//! registry only records the outcome; the balance effects live with the
//! custody collaborator.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use driiphub_types::WalletId;
use serde::{Deserialize, Serialize};

/// A recorded seizure of `source` in favor of challenger `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seizure {
    /// The disqualified wallet.
    pub source: WalletId,
    /// The challenger the claim is forfeited to.
    pub target: WalletId,
    /// When the seizure was recorded.
    pub seized_at: DateTime<Utc>,
}

/// Append-only log of seizures with a derived seized-wallet set.
#[derive(Debug, Clone, Default)]
pub struct SeizureRegistry {
    seizures: Vec<Seizure>,
    seized: HashSet<WalletId>,
}

impl SeizureRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a seizure of `source` for `target`.
    pub fn record(&mut self, source: WalletId, target: WalletId) {
        self.seizures.push(Seizure {
            source,
            target,
            seized_at: Utc::now(),
        });
        self.seized.insert(source);
    }

    /// Whether `wallet` has ever been seized.
    #[must_use]
    pub fn is_seized_wallet(&self, wallet: WalletId) -> bool {
        self.seized.contains(&wallet)
    }

    /// Number of distinct seized wallets.
    #[must_use]
    pub fn seized_wallets_count(&self) -> usize {
        self.seized.len()
    }

    /// Number of seizure records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.seizures.len()
    }

    /// The seizure record at `index`, if any.
    #[must_use]
    pub fn seizure(&self, index: usize) -> Option<&Seizure> {
        self.seizures.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry() {
        let registry = SeizureRegistry::new();
        assert_eq!(registry.count(), 0);
        assert_eq!(registry.seized_wallets_count(), 0);
        assert!(!registry.is_seized_wallet(WalletId::random()));
        assert!(registry.seizure(0).is_none());
    }

    #[test]
    fn record_marks_wallet_seized() {
        let mut registry = SeizureRegistry::new();
        let source = WalletId::random();
        let target = WalletId::random();
        registry.record(source, target);

        assert!(registry.is_seized_wallet(source));
        assert!(!registry.is_seized_wallet(target));
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.seized_wallets_count(), 1);

        let seizure = registry.seizure(0).unwrap();
        assert_eq!(seizure.source, source);
        assert_eq!(seizure.target, target);
    }

    #[test]
    fn seizure_is_permanent() {
        let mut registry = SeizureRegistry::new();
        let source = WalletId::random();
        registry.record(source, WalletId::random());
        registry.record(source, WalletId::random());

        // Two records, one seized wallet, still seized.
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.seized_wallets_count(), 1);
        assert!(registry.is_seized_wallet(source));
    }
}

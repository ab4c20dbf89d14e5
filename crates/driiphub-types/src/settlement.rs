//! Settlement records: the engine's append-only history of settled driips.
//!
//! A record is created at most once per driip nonce. Each party's `done`
//! flag flips exactly when that party's transfer completes; two parties
//! settling independently merge into the same record keyed by nonce.

use serde::{Deserialize, Serialize};

use crate::{DriipType, WalletId};

/// How many sides of the settlement have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sidedness {
    /// Only one party's transfer has completed.
    OneSided,
    /// Both parties' transfers have completed.
    TwoSided,
}

impl std::fmt::Display for Sidedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneSided => write!(f, "ONE_SIDED"),
            Self::TwoSided => write!(f, "TWO_SIDED"),
        }
    }
}

/// One party's slot in a settlement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementParty {
    /// The party's wallet-level nonce.
    pub nonce: u64,
    /// The party's wallet.
    pub wallet: WalletId,
    /// Whether this party's transfer has completed.
    pub done: bool,
}

impl SettlementParty {
    #[must_use]
    pub fn new(nonce: u64, wallet: WalletId) -> Self {
        Self {
            nonce,
            wallet,
            done: false,
        }
    }
}

/// The settlement history entry for a driip nonce.
///
/// Origin/target are seller/buyer for a trade and sender/recipient for a
/// payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// The driip's global nonce; unique per record.
    pub nonce: u64,
    /// Trade or payment.
    pub driip_type: DriipType,
    pub origin: SettlementParty,
    pub target: SettlementParty,
    pub sidedness: Sidedness,
}

impl SettlementRecord {
    /// Create a fresh record with neither side done.
    #[must_use]
    pub fn new(
        nonce: u64,
        driip_type: DriipType,
        origin: SettlementParty,
        target: SettlementParty,
    ) -> Self {
        Self {
            nonce,
            driip_type,
            origin,
            target,
            sidedness: Sidedness::OneSided,
        }
    }

    /// Whether `wallet` occupies one of the record's two slots.
    #[must_use]
    pub fn is_party(&self, wallet: WalletId) -> bool {
        self.origin.wallet == wallet || self.target.wallet == wallet
    }

    /// The slot held by `wallet`, if any.
    #[must_use]
    pub fn party(&self, wallet: WalletId) -> Option<&SettlementParty> {
        if self.origin.wallet == wallet {
            Some(&self.origin)
        } else if self.target.wallet == wallet {
            Some(&self.target)
        } else {
            None
        }
    }

    /// Mutable access to the slot held by `wallet`, if any.
    pub fn party_mut(&mut self, wallet: WalletId) -> Option<&mut SettlementParty> {
        if self.origin.wallet == wallet {
            Some(&mut self.origin)
        } else if self.target.wallet == wallet {
            Some(&mut self.target)
        } else {
            None
        }
    }

    /// Recompute sidedness from the two `done` flags.
    pub fn refresh_sidedness(&mut self) {
        self.sidedness = if self.origin.done && self.target.done {
            Sidedness::TwoSided
        } else {
            Sidedness::OneSided
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SettlementRecord {
        SettlementRecord::new(
            10,
            DriipType::Trade,
            SettlementParty::new(3, WalletId([1u8; 20])),
            SettlementParty::new(4, WalletId([2u8; 20])),
        )
    }

    #[test]
    fn fresh_record_is_one_sided() {
        let rec = record();
        assert_eq!(rec.sidedness, Sidedness::OneSided);
        assert!(!rec.origin.done);
        assert!(!rec.target.done);
    }

    #[test]
    fn party_lookup() {
        let rec = record();
        assert!(rec.is_party(WalletId([1u8; 20])));
        assert!(rec.is_party(WalletId([2u8; 20])));
        assert!(!rec.is_party(WalletId([3u8; 20])));
        assert_eq!(rec.party(WalletId([1u8; 20])).unwrap().nonce, 3);
        assert!(rec.party(WalletId([9u8; 20])).is_none());
    }

    #[test]
    fn sidedness_flips_when_both_done() {
        let mut rec = record();
        rec.party_mut(WalletId([2u8; 20])).unwrap().done = true;
        rec.refresh_sidedness();
        assert_eq!(rec.sidedness, Sidedness::OneSided);

        rec.party_mut(WalletId([1u8; 20])).unwrap().done = true;
        rec.refresh_sidedness();
        assert_eq!(rec.sidedness, Sidedness::TwoSided);
    }

    #[test]
    fn record_serde_roundtrip() {
        let rec = record();
        let json = serde_json::to_string(&rec).unwrap();
        let back: SettlementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}

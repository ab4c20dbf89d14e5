//! The driip model: sealed trades and payments awaiting settlement.
//!
//! A driip is immutable once sealed. The engine never mutates it; it only
//! reads amounts, parties, and the seal, and records settlement state in
//! its own [`crate::SettlementRecord`]s.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Currency, DriipHash, Seal, WalletId};

/// The two flavors of driip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriipType {
    Trade,
    Payment,
}

impl std::fmt::Display for DriipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trade => write!(f, "TRADE"),
            Self::Payment => write!(f, "PAYMENT"),
        }
    }
}

/// Which side of the book a trade party provided liquidity on.
/// This is the fee-schedule input for the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidityRole {
    Maker,
    Taker,
}

impl std::fmt::Display for LiquidityRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Maker => write!(f, "MAKER"),
            Self::Taker => write!(f, "TAKER"),
        }
    }
}

/// One party to a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParty {
    /// The party's wallet.
    pub wallet: WalletId,
    /// The party's wallet-level nonce for this trade.
    pub nonce: u64,
    /// Liquidity role; selects the fee schedule.
    pub role: LiquidityRole,
    /// Settle amount in the intended currency.
    pub intended: Decimal,
    /// Settle amount in the conjugate currency.
    pub conjugate: Decimal,
}

/// A sealed trade between a buyer and a seller across two currencies.
///
/// The buyer's incoming leg is the intended currency; the seller's is the
/// conjugate. `amount` is the traded quantity in the intended currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Global driip nonce.
    pub nonce: u64,
    /// The currency the buyer receives.
    pub intended_currency: Currency,
    /// The currency the seller receives.
    pub conjugate_currency: Currency,
    /// Traded quantity in the intended currency.
    pub amount: Decimal,
    pub buyer: TradeParty,
    pub seller: TradeParty,
    /// Block height the trade was sealed against.
    pub block_number: u64,
    /// Operator seal.
    pub seal: Seal,
}

impl Trade {
    /// Whether `wallet` is the buyer or the seller.
    #[must_use]
    pub fn is_party(&self, wallet: WalletId) -> bool {
        self.buyer.wallet == wallet || self.seller.wallet == wallet
    }

    /// Whether `wallet` is the buyer.
    #[must_use]
    pub fn is_buyer(&self, wallet: WalletId) -> bool {
        self.buyer.wallet == wallet
    }

    /// The party entry for `wallet`, if it is one.
    #[must_use]
    pub fn party(&self, wallet: WalletId) -> Option<&TradeParty> {
        if self.buyer.wallet == wallet {
            Some(&self.buyer)
        } else if self.seller.wallet == wallet {
            Some(&self.seller)
        } else {
            None
        }
    }

    /// Canonical SHA-256 hash over the trade's sealed fields.
    #[must_use]
    pub fn compute_hash(&self) -> DriipHash {
        let mut hasher = Sha256::new();
        hasher.update(b"driiphub:trade:v1:");
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(self.intended_currency.as_bytes());
        hasher.update(self.conjugate_currency.as_bytes());
        hasher.update(self.amount.to_string().as_bytes());
        for party in [&self.buyer, &self.seller] {
            hasher.update(party.wallet.as_bytes());
            hasher.update(party.nonce.to_le_bytes());
            hasher.update(party.intended.to_string().as_bytes());
            hasher.update(party.conjugate.to_string().as_bytes());
        }
        hasher.update(self.block_number.to_le_bytes());
        DriipHash(hasher.finalize().into())
    }
}

/// One party to a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentParty {
    /// The party's wallet.
    pub wallet: WalletId,
    /// The party's wallet-level nonce for this payment.
    pub nonce: u64,
    /// Settle amount for this party.
    pub amount: Decimal,
}

/// A sealed single-currency payment from a sender to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Global driip nonce.
    pub nonce: u64,
    /// The payment currency.
    pub currency: Currency,
    /// Transferred amount.
    pub amount: Decimal,
    pub sender: PaymentParty,
    pub recipient: PaymentParty,
    /// Block height the payment was sealed against.
    pub block_number: u64,
    /// Operator seal.
    pub seal: Seal,
}

impl Payment {
    /// Whether `wallet` is the sender or the recipient.
    #[must_use]
    pub fn is_party(&self, wallet: WalletId) -> bool {
        self.sender.wallet == wallet || self.recipient.wallet == wallet
    }

    /// Whether `wallet` is the sender.
    #[must_use]
    pub fn is_sender(&self, wallet: WalletId) -> bool {
        self.sender.wallet == wallet
    }

    /// The party entry for `wallet`, if it is one.
    #[must_use]
    pub fn party(&self, wallet: WalletId) -> Option<&PaymentParty> {
        if self.sender.wallet == wallet {
            Some(&self.sender)
        } else if self.recipient.wallet == wallet {
            Some(&self.recipient)
        } else {
            None
        }
    }

    /// Canonical SHA-256 hash over the payment's sealed fields.
    #[must_use]
    pub fn compute_hash(&self) -> DriipHash {
        let mut hasher = Sha256::new();
        hasher.update(b"driiphub:payment:v1:");
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(self.currency.as_bytes());
        hasher.update(self.amount.to_string().as_bytes());
        for party in [&self.sender, &self.recipient] {
            hasher.update(party.wallet.as_bytes());
            hasher.update(party.nonce.to_le_bytes());
            hasher.update(party.amount.to_string().as_bytes());
        }
        hasher.update(self.block_number.to_le_bytes());
        DriipHash(hasher.finalize().into())
    }
}

/// A sealed driip of either flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Driip {
    Trade(Trade),
    Payment(Payment),
}

impl Driip {
    #[must_use]
    pub fn nonce(&self) -> u64 {
        match self {
            Self::Trade(trade) => trade.nonce,
            Self::Payment(payment) => payment.nonce,
        }
    }

    #[must_use]
    pub fn driip_type(&self) -> DriipType {
        match self {
            Self::Trade(_) => DriipType::Trade,
            Self::Payment(_) => DriipType::Payment,
        }
    }

    #[must_use]
    pub fn block_number(&self) -> u64 {
        match self {
            Self::Trade(trade) => trade.block_number,
            Self::Payment(payment) => payment.block_number,
        }
    }

    #[must_use]
    pub fn seal(&self) -> &Seal {
        match self {
            Self::Trade(trade) => &trade.seal,
            Self::Payment(payment) => &payment.seal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks;

    #[test]
    fn trade_party_lookup() {
        let buyer = WalletId::random();
        let seller = WalletId::random();
        let trade = mocks::dummy_trade(buyer, seller, 1);

        assert!(trade.is_party(buyer));
        assert!(trade.is_party(seller));
        assert!(!trade.is_party(WalletId::random()));
        assert!(trade.is_buyer(buyer));
        assert!(!trade.is_buyer(seller));
        assert_eq!(trade.party(buyer).unwrap().wallet, buyer);
        assert!(trade.party(WalletId::random()).is_none());
    }

    #[test]
    fn trade_hash_is_deterministic() {
        let buyer = WalletId::random();
        let seller = WalletId::random();
        let trade = mocks::dummy_trade(buyer, seller, 1);
        assert_eq!(trade.compute_hash(), trade.compute_hash());

        let other = mocks::dummy_trade(buyer, seller, 2);
        assert_ne!(trade.compute_hash(), other.compute_hash());
    }

    #[test]
    fn payment_party_lookup() {
        let sender = WalletId::random();
        let recipient = WalletId::random();
        let payment = mocks::dummy_payment(sender, recipient, 1);

        assert!(payment.is_party(sender));
        assert!(payment.is_party(recipient));
        assert!(payment.is_sender(sender));
        assert!(!payment.is_sender(recipient));
        assert_eq!(payment.party(recipient).unwrap().wallet, recipient);
    }

    #[test]
    fn payment_hash_differs_from_trade_hash() {
        let a = WalletId::random();
        let b = WalletId::random();
        let trade = mocks::dummy_trade(a, b, 1);
        let payment = mocks::dummy_payment(a, b, 1);
        assert_ne!(trade.compute_hash(), payment.compute_hash());
    }

    #[test]
    fn driip_accessors() {
        let a = WalletId::random();
        let b = WalletId::random();
        let driip = Driip::Trade(mocks::dummy_trade(a, b, 9));
        assert_eq!(driip.nonce(), 9);
        assert_eq!(driip.driip_type(), DriipType::Trade);

        let driip = Driip::Payment(mocks::dummy_payment(a, b, 4));
        assert_eq!(driip.nonce(), 4);
        assert_eq!(driip.driip_type(), DriipType::Payment);
    }

    #[test]
    fn trade_serde_roundtrip() {
        let trade = mocks::dummy_trade(WalletId::random(), WalletId::random(), 3);
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }
}

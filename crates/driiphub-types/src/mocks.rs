//! Mock collaborators and dummy driip constructors for tests.
//!
//! Mocks default to the happy path (genuine seals, no fraud, data
//! available); tests flip individual flags to exercise each rejection arm.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    ClientFund, CommunityVote, Currency, DriipHash, DriiphubError, FraudChallenge, LiquidityRole,
    Payment, PaymentParty, ProposalStatus, Result, Seal, SettlementChallenge, Trade, TradeParty,
    Validator, WalletId,
};

// ---------------------------------------------------------------------------
// Dummy driips
// ---------------------------------------------------------------------------

/// The token currency used as the conjugate leg of dummy trades.
#[must_use]
pub fn dummy_token() -> Currency {
    Currency::token([0xAA; 20])
}

/// A sealed trade between `buyer` and `seller` at the given driip nonce.
///
/// The seal carries the correct canonical hash but a zero signature; use
/// [`MockValidator`] (which does not check signatures) or re-seal with a
/// real operator key.
#[must_use]
pub fn dummy_trade(buyer: WalletId, seller: WalletId, nonce: u64) -> Trade {
    let mut trade = Trade {
        nonce,
        intended_currency: Currency::NATIVE,
        conjugate_currency: dummy_token(),
        amount: Decimal::new(100, 0),
        buyer: TradeParty {
            wallet: buyer,
            nonce: nonce * 10 + 1,
            role: LiquidityRole::Taker,
            intended: Decimal::new(100, 0),
            conjugate: Decimal::new(50, 0),
        },
        seller: TradeParty {
            wallet: seller,
            nonce: nonce * 10 + 2,
            role: LiquidityRole::Maker,
            intended: Decimal::new(100, 0),
            conjugate: Decimal::new(50, 0),
        },
        block_number: 10,
        seal: Seal {
            hash: DriipHash([0u8; 32]),
            signature: vec![0u8; 64],
            sealed_at: Utc::now(),
        },
    };
    trade.seal.hash = trade.compute_hash();
    trade
}

/// A sealed payment from `sender` to `recipient` at the given driip nonce.
#[must_use]
pub fn dummy_payment(sender: WalletId, recipient: WalletId, nonce: u64) -> Payment {
    let mut payment = Payment {
        nonce,
        currency: Currency::NATIVE,
        amount: Decimal::new(100, 0),
        sender: PaymentParty {
            wallet: sender,
            nonce: nonce * 10 + 1,
            amount: Decimal::new(300, 0),
        },
        recipient: PaymentParty {
            wallet: recipient,
            nonce: nonce * 10 + 2,
            amount: Decimal::new(100, 0),
        },
        block_number: 10,
        seal: Seal {
            hash: DriipHash([0u8; 32]),
            signature: vec![0u8; 64],
            sealed_at: Utc::now(),
        },
    };
    payment.seal.hash = payment.compute_hash();
    payment
}

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

/// Validator mock: seal flags are returned as-is; party checks consult the
/// driip unless `confirm_parties` is cleared.
#[derive(Debug, Clone)]
pub struct MockValidator {
    pub genuine_trade_seal: bool,
    pub genuine_payment_seal: bool,
    pub confirm_parties: bool,
}

impl Default for MockValidator {
    fn default() -> Self {
        Self {
            genuine_trade_seal: true,
            genuine_payment_seal: true,
            confirm_parties: true,
        }
    }
}

impl Validator for MockValidator {
    fn is_genuine_trade_seal(&self, _trade: &Trade) -> bool {
        self.genuine_trade_seal
    }
    fn is_genuine_payment_seal(&self, _payment: &Payment) -> bool {
        self.genuine_payment_seal
    }
    fn is_trade_party(&self, trade: &Trade, wallet: WalletId) -> bool {
        self.confirm_parties && trade.is_party(wallet)
    }
    fn is_payment_party(&self, payment: &Payment, wallet: WalletId) -> bool {
        self.confirm_parties && payment.is_party(wallet)
    }
}

/// Fraud-challenge mock: global flags plus recorded evidence.
#[derive(Debug, Clone, Default)]
pub struct MockFraudChallenge {
    pub fraudulent_trade_hash: bool,
    pub fraudulent_payment_hash: bool,
    pub recorded_hashes: Vec<DriipHash>,
    pub double_spenders: Vec<WalletId>,
}

impl FraudChallenge for MockFraudChallenge {
    fn is_fraudulent_trade_hash(&self, hash: &DriipHash) -> bool {
        self.fraudulent_trade_hash || self.recorded_hashes.contains(hash)
    }
    fn is_fraudulent_payment_hash(&self, hash: &DriipHash) -> bool {
        self.fraudulent_payment_hash || self.recorded_hashes.contains(hash)
    }
    fn record_fraudulent_hash(&mut self, hash: DriipHash) {
        self.recorded_hashes.push(hash);
    }
    fn record_double_spender_wallet(&mut self, wallet: WalletId) {
        self.double_spenders.push(wallet);
    }
}

/// Community-vote mock.
#[derive(Debug, Clone)]
pub struct MockCommunityVote {
    pub double_spenders: Vec<WalletId>,
    pub data_available: bool,
    pub max_driip_nonce: u64,
}

impl Default for MockCommunityVote {
    fn default() -> Self {
        Self {
            double_spenders: Vec::new(),
            data_available: true,
            max_driip_nonce: 0,
        }
    }
}

impl CommunityVote for MockCommunityVote {
    fn is_double_spender_wallet(&self, wallet: WalletId) -> bool {
        self.double_spenders.contains(&wallet)
    }
    fn is_data_available(&self) -> bool {
        self.data_available
    }
    fn max_driip_nonce(&self) -> u64 {
        self.max_driip_nonce
    }
}

/// Client-fund mock: records every custody request; transfers in
/// `failing_currencies` are refused.
#[derive(Debug, Clone, Default)]
pub struct MockClientFund {
    pub settled_transfers: Vec<(WalletId, Decimal, Currency)>,
    pub withdrawals: Vec<(WalletId, WalletId, Decimal, Currency)>,
    pub seizures: Vec<(WalletId, WalletId)>,
    pub failing_currencies: Vec<Currency>,
}

impl ClientFund for MockClientFund {
    fn transfer_to_settled_balance(
        &mut self,
        wallet: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()> {
        if self.failing_currencies.contains(&currency) {
            return Err(DriiphubError::InsufficientActive {
                needed: amount,
                available: Decimal::ZERO,
            });
        }
        self.settled_transfers.push((wallet, amount, currency));
        Ok(())
    }

    fn withdraw_from_deposited_balance(
        &mut self,
        wallet: WalletId,
        beneficiary: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()> {
        self.withdrawals.push((wallet, beneficiary, amount, currency));
        Ok(())
    }

    fn seize(&mut self, source: WalletId, target: WalletId) -> Result<()> {
        self.seizures.push((source, target));
        Ok(())
    }
}

/// Settlement-challenge mock with per-wallet proposal state.
#[derive(Debug, Clone, Default)]
pub struct MockSettlementChallenge {
    proposal_nonces: HashMap<WalletId, u64>,
    statuses: HashMap<WalletId, ProposalStatus>,
    challengers: HashMap<WalletId, WalletId>,
}

impl MockSettlementChallenge {
    /// Register a proposal for `wallet` at `nonce` with the given outcome.
    pub fn set_proposal(&mut self, wallet: WalletId, nonce: u64, status: ProposalStatus) {
        self.proposal_nonces.insert(wallet, nonce);
        self.statuses.insert(wallet, status);
    }

    /// Register the challenger that disqualified `wallet`.
    pub fn set_challenger(&mut self, wallet: WalletId, challenger: WalletId) {
        self.challengers.insert(wallet, challenger);
    }
}

impl SettlementChallenge for MockSettlementChallenge {
    fn proposal_nonce(&self, wallet: WalletId) -> Option<u64> {
        self.proposal_nonces.get(&wallet).copied()
    }
    fn proposal_status(&self, wallet: WalletId, _nonce: u64) -> ProposalStatus {
        self.statuses
            .get(&wallet)
            .copied()
            .unwrap_or(ProposalStatus::Unresolved)
    }
    fn proposal_challenger(&self, wallet: WalletId, _nonce: u64) -> Option<WalletId> {
        self.challengers.get(&wallet).copied()
    }
}

//! The production seal validator.
//!
//! Recomputes the canonical driip hash, checks the seal's ed25519 signature
//! against the operator key, and answers party-membership queries
//! structurally from the driip itself.

use driiphub_types::{Payment, Trade, Validator, WalletId};
use ed25519_dalek::VerifyingKey;

/// Validator backed by the operator's ed25519 verifying key.
#[derive(Debug, Clone)]
pub struct SealValidator {
    operator_key: VerifyingKey,
}

impl SealValidator {
    /// Create a validator trusting seals signed by `operator_key`.
    #[must_use]
    pub fn new(operator_key: VerifyingKey) -> Self {
        Self { operator_key }
    }

    /// The trusted operator key.
    #[must_use]
    pub fn operator_key(&self) -> &VerifyingKey {
        &self.operator_key
    }
}

impl Validator for SealValidator {
    fn is_genuine_trade_seal(&self, trade: &Trade) -> bool {
        trade.seal.verify(&trade.compute_hash(), &self.operator_key)
    }

    fn is_genuine_payment_seal(&self, payment: &Payment) -> bool {
        payment
            .seal
            .verify(&payment.compute_hash(), &self.operator_key)
    }

    fn is_trade_party(&self, trade: &Trade, wallet: WalletId) -> bool {
        trade.is_party(wallet)
    }

    fn is_payment_party(&self, payment: &Payment, wallet: WalletId) -> bool {
        payment.is_party(wallet)
    }
}

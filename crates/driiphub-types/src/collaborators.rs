//! Collaborator interfaces consumed by the settlement engine.
//!
//! These traits are the boundary to the subsystems the engine does not own:
//! seal validation, fraud evidence, community voting, balance custody, the
//! dispute-window challenge, and the reserve fund. The engine holds boxed
//! trait objects and swaps them only through authenticated admin operations.
//!
//! Every trait is also implemented for `Rc<RefCell<T>>`, so a host can
//! inject a collaborator into the engine while retaining its own handle to
//! the same instance (the reserve fund is both engine collaborator and a
//! user-facing subsystem).

use std::{cell::RefCell, rc::Rc};

use rust_decimal::Decimal;

use crate::{Currency, DriipHash, Payment, Result, Trade, TransferTx, WalletId};

/// Outcome of the dispute-window challenge for a settlement proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProposalStatus {
    /// The challenge window closed without a successful challenge.
    Qualified,
    /// A challenger proved the proposal wrong; settlement becomes seizure.
    Disqualified,
    /// The challenge has not concluded.
    Unresolved,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qualified => write!(f, "QUALIFIED"),
            Self::Disqualified => write!(f, "DISQUALIFIED"),
            Self::Unresolved => write!(f, "UNRESOLVED"),
        }
    }
}

/// Seal and party validation.
pub trait Validator {
    fn is_genuine_trade_seal(&self, trade: &Trade) -> bool;
    fn is_genuine_payment_seal(&self, payment: &Payment) -> bool;
    fn is_trade_party(&self, trade: &Trade, wallet: WalletId) -> bool;
    fn is_payment_party(&self, payment: &Payment, wallet: WalletId) -> bool;
}

/// Fraud-evidence storage. The write side is used by the sibling
/// fraud-detection component, not by the settlement engine itself.
pub trait FraudChallenge {
    fn is_fraudulent_trade_hash(&self, hash: &DriipHash) -> bool;
    fn is_fraudulent_payment_hash(&self, hash: &DriipHash) -> bool;
    fn record_fraudulent_hash(&mut self, hash: DriipHash);
    fn record_double_spender_wallet(&mut self, wallet: WalletId);
}

/// Community-wide fraud and data-availability voting.
pub trait CommunityVote {
    fn is_double_spender_wallet(&self, wallet: WalletId) -> bool;
    fn is_data_available(&self) -> bool;
    fn max_driip_nonce(&self) -> u64;
}

/// Wallet-balance custody.
pub trait ClientFund {
    /// Move `amount` of `currency` from the wallet's deposited balance to
    /// its settled balance.
    fn transfer_to_settled_balance(
        &mut self,
        wallet: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()>;

    /// Withdraw `amount` of `currency` from the wallet's deposited balance
    /// to a beneficiary (the revenue fund, for fees).
    fn withdraw_from_deposited_balance(
        &mut self,
        wallet: WalletId,
        beneficiary: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()>;

    /// Seize a disqualified wallet's holdings for the challenger.
    fn seize(&mut self, source: WalletId, target: WalletId) -> Result<()>;
}

/// The dispute-window challenge oracle.
pub trait SettlementChallenge {
    /// The driip nonce of the wallet's current settlement proposal, if any.
    fn proposal_nonce(&self, wallet: WalletId) -> Option<u64>;
    /// The challenge outcome for the wallet's proposal at `nonce`.
    fn proposal_status(&self, wallet: WalletId, nonce: u64) -> ProposalStatus;
    /// The challenger that disqualified the wallet's proposal, if any.
    fn proposal_challenger(&self, wallet: WalletId, nonce: u64) -> Option<WalletId>;
}

/// The reserve fund's stand-in interface for completing one-sided
/// settlements.
pub trait ReserveFund {
    /// Whether the reserve pool can cover the outbound leg.
    fn outbound_transfer_supported(&self, tx: &TransferTx) -> bool;
    /// Atomically swap the wallet's staged inbound leg for the reserve's
    /// outbound leg. Both legs execute or neither does.
    fn two_way_transfer(
        &mut self,
        wallet: WalletId,
        inbound: &TransferTx,
        outbound: &TransferTx,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Shared-handle forwarding impls
// ---------------------------------------------------------------------------

impl<T: Validator> Validator for Rc<RefCell<T>> {
    fn is_genuine_trade_seal(&self, trade: &Trade) -> bool {
        self.borrow().is_genuine_trade_seal(trade)
    }
    fn is_genuine_payment_seal(&self, payment: &Payment) -> bool {
        self.borrow().is_genuine_payment_seal(payment)
    }
    fn is_trade_party(&self, trade: &Trade, wallet: WalletId) -> bool {
        self.borrow().is_trade_party(trade, wallet)
    }
    fn is_payment_party(&self, payment: &Payment, wallet: WalletId) -> bool {
        self.borrow().is_payment_party(payment, wallet)
    }
}

impl<T: FraudChallenge> FraudChallenge for Rc<RefCell<T>> {
    fn is_fraudulent_trade_hash(&self, hash: &DriipHash) -> bool {
        self.borrow().is_fraudulent_trade_hash(hash)
    }
    fn is_fraudulent_payment_hash(&self, hash: &DriipHash) -> bool {
        self.borrow().is_fraudulent_payment_hash(hash)
    }
    fn record_fraudulent_hash(&mut self, hash: DriipHash) {
        self.borrow_mut().record_fraudulent_hash(hash);
    }
    fn record_double_spender_wallet(&mut self, wallet: WalletId) {
        self.borrow_mut().record_double_spender_wallet(wallet);
    }
}

impl<T: CommunityVote> CommunityVote for Rc<RefCell<T>> {
    fn is_double_spender_wallet(&self, wallet: WalletId) -> bool {
        self.borrow().is_double_spender_wallet(wallet)
    }
    fn is_data_available(&self) -> bool {
        self.borrow().is_data_available()
    }
    fn max_driip_nonce(&self) -> u64 {
        self.borrow().max_driip_nonce()
    }
}

impl<T: ClientFund> ClientFund for Rc<RefCell<T>> {
    fn transfer_to_settled_balance(
        &mut self,
        wallet: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()> {
        self.borrow_mut()
            .transfer_to_settled_balance(wallet, amount, currency)
    }
    fn withdraw_from_deposited_balance(
        &mut self,
        wallet: WalletId,
        beneficiary: WalletId,
        amount: Decimal,
        currency: Currency,
    ) -> Result<()> {
        self.borrow_mut()
            .withdraw_from_deposited_balance(wallet, beneficiary, amount, currency)
    }
    fn seize(&mut self, source: WalletId, target: WalletId) -> Result<()> {
        self.borrow_mut().seize(source, target)
    }
}

impl<T: SettlementChallenge> SettlementChallenge for Rc<RefCell<T>> {
    fn proposal_nonce(&self, wallet: WalletId) -> Option<u64> {
        self.borrow().proposal_nonce(wallet)
    }
    fn proposal_status(&self, wallet: WalletId, nonce: u64) -> ProposalStatus {
        self.borrow().proposal_status(wallet, nonce)
    }
    fn proposal_challenger(&self, wallet: WalletId, nonce: u64) -> Option<WalletId> {
        self.borrow().proposal_challenger(wallet, nonce)
    }
}

impl<T: ReserveFund> ReserveFund for Rc<RefCell<T>> {
    fn outbound_transfer_supported(&self, tx: &TransferTx) -> bool {
        self.borrow().outbound_transfer_supported(tx)
    }
    fn two_way_transfer(
        &mut self,
        wallet: WalletId,
        inbound: &TransferTx,
        outbound: &TransferTx,
    ) -> Result<()> {
        self.borrow_mut().two_way_transfer(wallet, inbound, outbound)
    }
}

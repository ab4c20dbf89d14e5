//! Observable events emitted by the two planes.
//!
//! Events form an append-only log, one entry per state change. They are the
//! audit surface callers and tests observe instead of poking at internal
//! state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Currency, TransferTx, WalletId};

/// Events emitted by the settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementEvent {
    /// A wallet's incoming leg was moved to its settled balance.
    SettledBalanceUpdated {
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
    },
    /// The reserve fund stood in for the counterparty on a leg.
    ReserveStandIn {
        wallet: WalletId,
        nonce: u64,
        currency: Currency,
        amount: Decimal,
    },
    /// A settlement fee was withdrawn to the revenue fund.
    TotalFeeStaged {
        wallet: WalletId,
        beneficiary: WalletId,
        currency: Currency,
        amount: Decimal,
    },
    /// A trade leg settled for a wallet.
    TradeSettled {
        wallet: WalletId,
        nonce: u64,
        by_proxy: bool,
    },
    /// A payment leg settled for a wallet.
    PaymentSettled {
        wallet: WalletId,
        nonce: u64,
        by_proxy: bool,
    },
    /// A disqualified wallet was seized for the challenger.
    WalletSeized { source: WalletId, target: WalletId },
    /// The global max driip nonce was adopted from the community vote.
    MaxDriipNonceUpdated { nonce: u64 },
    DeployerChanged { old: WalletId, new: WalletId },
    OperatorChanged { old: WalletId, new: WalletId },
    ConfigurationChanged,
    ValidatorChanged,
    FraudChallengeChanged,
    CommunityVoteChanged,
    ClientFundChanged,
    SettlementChallengeChanged,
    ReserveFundChanged,
    TradesRevenueFundChanged { fund: WalletId },
    PaymentsRevenueFundChanged { fund: WalletId },
    CommunityVoteUpdateDisabled,
}

/// Events emitted by the reserve ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveEvent {
    Deposited {
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
        block_number: u64,
    },
    Staged {
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
    },
    /// Staged funds left the ledger; the external asset transfer follows.
    Withdrawn {
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
    },
    AccrualPeriodClosed { block_number: u64 },
    AccrualClaimed {
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
    },
    TwoWayTransferred {
        wallet: WalletId,
        inbound: TransferTx,
        outbound: TransferTx,
    },
}

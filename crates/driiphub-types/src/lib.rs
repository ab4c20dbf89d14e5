//! # driiphub-types
//!
//! Shared types, errors, and collaborator interfaces for the **DriipHub**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`WalletId`], [`Currency`], [`DriipHash`]
//! - **Driip model**: [`Trade`], [`Payment`], [`Driip`], [`TradeParty`], [`PaymentParty`]
//! - **Seals**: [`Seal`] with ed25519 operator signatures
//! - **Settlement model**: [`SettlementRecord`], [`SettlementParty`], [`Sidedness`]
//! - **Balance model**: [`BalanceEntry`], [`Deposit`], [`TransferTx`]
//! - **Configuration**: [`Configuration`], [`FeeSchedule`], [`DiscountTier`], [`OperationalMode`]
//! - **Collaborator interfaces**: [`Validator`], [`FraudChallenge`], [`CommunityVote`],
//!   [`ClientFund`], [`SettlementChallenge`], [`ReserveFund`]
//! - **Events**: [`SettlementEvent`], [`ReserveEvent`]
//! - **Errors**: [`DriiphubError`] with `DH_ERR_` prefix codes

pub mod balance;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod driip;
pub mod error;
pub mod event;
pub mod ids;
pub mod seal;
pub mod settlement;
pub mod transfer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;

// Re-export all primary types at crate root for ergonomic imports:
//   use driiphub_types::{Trade, Payment, SettlementRecord, ...};

pub use balance::*;
pub use collaborators::*;
pub use config::*;
pub use driip::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use seal::*;
pub use settlement::*;
pub use transfer::*;

// Constants are accessed via `driiphub_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! # driiphub-reserve
//!
//! **Reserve Fund plane**: per-wallet deposit logs, active/staged balance
//! accounting, periodic accrual with balance-block pro-rata allocation, and
//! the atomic two-way transfer the settlement engine uses to complete
//! one-sided settlements.
//!
//! ## Architecture
//!
//! 1. **`accrual`**: the pure balance-block integration — a deposit's
//!    amount weighted by the number of blocks it stood unchanged — and the
//!    pro-rata share formula over a closed accrual window
//! 2. **[`ReserveLedger`]**: the stateful fund — deposits, wallet balances,
//!    aggregate pools, accrual periods, claims, and two-way transfers
//!
//! The ledger implements [`driiphub_types::ReserveFund`], so it can be
//! injected into the settlement engine (through an `Rc<RefCell<_>>` handle)
//! while wallets keep depositing, staging, and claiming against the same
//! instance.

pub mod accrual;
pub mod ledger;

pub use ledger::ReserveLedger;

//! # driiphub-settlement
//!
//! **Settlement Plane**: driip validation, challenge-result branching,
//! balance movement requests, fee withdrawal, and settlement history.
//!
//! ## Architecture
//!
//! The plane is built from four components around one state machine:
//! 1. **NonceLedger**: per-(wallet, currency) high-water-mark of settled
//!    nonces plus the global max settled nonce (replay protection)
//! 2. **FeeCalculator** (`fees`): pure fee computation against
//!    block-versioned schedules
//! 3. **SeizureRegistry**: wallet→challenger seizures from disqualified
//!    challenges
//! 4. **SealValidator**: the production ed25519 `Validator`
//! 5. **SettlementEngine**: the orchestrator — validates a sealed driip,
//!    consults the challenge oracle, moves balances through the custody
//!    collaborator (with the reserve fund standing in for an absent
//!    counterparty), withdraws fees, and records settlement history
//!
//! ## Settle Flow
//!
//! ```text
//! caller → SettlementEngine.settle()
//!        → NonceLedger (replay?) → SettlementChallenge (qualified?)
//!        → fees::fee() → ClientFund (transfer + fee) ⇢ ReserveFund (stand-in)
//!        → SettlementRecord upsert → events
//! ```
//!
//! Every failure is a local rejection before any engine-state mutation;
//! there are no partial settlements and no automatic retries.

pub mod engine;
pub mod fees;
pub mod nonce_ledger;
pub mod seizure;
pub mod validation;

pub use engine::{SettlementEngine, SettlementOutcome};
pub use nonce_ledger::NonceLedger;
pub use seizure::{Seizure, SeizureRegistry};
pub use validation::SealValidator;

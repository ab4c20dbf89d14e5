//! Error types for the DriipHub settlement engine.
//!
//! All errors use the `DH_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Driip integrity / precondition errors
//! - 2xx: Settlement errors
//! - 3xx: Authorization errors
//! - 4xx: Reserve fund errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{DriipHash, WalletId};

/// Central error enum for all DriipHub operations.
#[derive(Debug, Error)]
pub enum DriiphubError {
    // =================================================================
    // Driip Integrity / Precondition Errors (1xx)
    // =================================================================
    /// A required collaborator reference has not been set.
    #[error("DH_ERR_100: {0} collaborator is not initialized")]
    UninitializedCollaborator(&'static str),

    /// The driip's operator seal did not verify.
    #[error("DH_ERR_101: driip seal is not genuine")]
    SealInvalid,

    /// The driip hash has been flagged fraudulent by the fraud challenge.
    #[error("DH_ERR_102: driip hash {0} is flagged as fraudulent")]
    FraudulentDriip(DriipHash),

    /// The wallet is not a party to the driip being settled.
    #[error("DH_ERR_103: wallet {0} is not a party to the driip")]
    NotDriipParty(WalletId),

    /// The wallet has been community-flagged as a double spender.
    #[error("DH_ERR_104: wallet {0} is flagged as a double spender")]
    DoubleSpenderWallet(WalletId),

    // =================================================================
    // Settlement Errors (2xx)
    // =================================================================
    /// The wallet has already settled this driip nonce (replay guard).
    #[error("DH_ERR_200: driip already settled by wallet {wallet} at nonce {nonce}")]
    AlreadySettled { wallet: WalletId, nonce: u64 },

    /// No challenge proposal matches the driip, or the challenge is unresolved.
    #[error("DH_ERR_201: no qualified settlement proposal for wallet {wallet} at nonce {nonce}")]
    NoSettlementProposal { wallet: WalletId, nonce: u64 },

    /// Exit mode forbids settling beyond the community-agreed max nonce.
    #[error("DH_ERR_202: exit mode forbids settling nonce {nonce} beyond max {max_nonce}")]
    ExitModeRestriction { nonce: u64, max_nonce: u64 },

    /// Community data is unavailable for nonces beyond the agreed max.
    #[error("DH_ERR_203: community data unavailable for nonce {nonce} beyond max {max_nonce}")]
    DataUnavailable { nonce: u64, max_nonce: u64 },

    /// No settlement record matches the query.
    #[error("DH_ERR_204: settlement not found")]
    SettlementNotFound,

    /// No fee schedule is in force at the given block height.
    #[error("DH_ERR_205: no fee schedule in force at block {block_number}")]
    NoFeeSchedule { block_number: u64 },

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// The caller does not hold the required role for this operation.
    #[error("DH_ERR_300: caller is not the {role}")]
    Unauthorized { role: &'static str },

    /// The community vote reference has been permanently frozen.
    #[error("DH_ERR_301: community vote updates are permanently disabled")]
    CommunityVoteUpdateDisabled,

    /// The fund operator may not stage on its own behalf.
    #[error("DH_ERR_302: fund operator may not stage its own balance")]
    OperatorMayNotStage,

    // =================================================================
    // Reserve Fund Errors (4xx)
    // =================================================================
    /// An amount must be strictly positive.
    #[error("DH_ERR_400: amount must be strictly positive")]
    ZeroAmount,

    /// A wallet or token currency handle must not be the null address.
    #[error("DH_ERR_401: null address is not allowed here")]
    ZeroAddress,

    /// Not enough active balance for the operation.
    #[error("DH_ERR_402: insufficient active balance: need {needed}, have {available}")]
    InsufficientActive { needed: Decimal, available: Decimal },

    /// Not enough staged balance for the operation.
    #[error("DH_ERR_403: insufficient staged balance: need {needed}, have {available}")]
    InsufficientStaged { needed: Decimal, available: Decimal },

    /// Not enough aggregate active balance in the reserve pool.
    #[error("DH_ERR_404: insufficient aggregate balance: need {needed}, have {available}")]
    InsufficientAggregate { needed: Decimal, available: Decimal },

    /// No claimable accrual exists for the currency.
    #[error("DH_ERR_405: no claimable accrual for this currency")]
    NoAccrual,

    /// The accrual claim window spans zero blocks (undefined fraction).
    #[error("DH_ERR_406: accrual claim window spans zero blocks")]
    NoBlockSpan,

    /// No deposit record exists at the given index.
    #[error("DH_ERR_407: no deposit at index {index} for wallet {wallet}")]
    DepositNotFound { wallet: WalletId, index: usize },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("DH_ERR_900: internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DriiphubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = DriiphubError::SealInvalid;
        let msg = format!("{err}");
        assert!(msg.starts_with("DH_ERR_101"), "Got: {msg}");
    }

    #[test]
    fn already_settled_display() {
        let err = DriiphubError::AlreadySettled {
            wallet: WalletId([1u8; 20]),
            nonce: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("DH_ERR_200"));
        assert!(msg.contains("nonce 7"));
    }

    #[test]
    fn insufficient_staged_display() {
        let err = DriiphubError::InsufficientStaged {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("DH_ERR_403"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_dh_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(DriiphubError::UninitializedCollaborator("validator")),
            Box::new(DriiphubError::NoSettlementProposal {
                wallet: WalletId::ZERO,
                nonce: 1,
            }),
            Box::new(DriiphubError::Unauthorized { role: "operator" }),
            Box::new(DriiphubError::ZeroAmount),
            Box::new(DriiphubError::NoBlockSpan),
            Box::new(DriiphubError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("DH_ERR_"),
                "Error missing DH_ERR_ prefix: {msg}"
            );
        }
    }
}

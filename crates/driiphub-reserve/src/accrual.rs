//! Balance-block accrual allocation.
//!
//! A wallet's claim on a closed accrual pool is proportional to its
//! **balance-blocks**: each in-window deposit contributes its amount
//! multiplied by the number of blocks it remained the latest deposit
//! (until the next deposit, or the window's upper bound). The share is an
//! explicit fold over the ordered deposit sequence so the arithmetic stays
//! auditable and testable on its own.

use driiphub_types::{Currency, Deposit, DriiphubError, Result};
use rust_decimal::Decimal;

/// Sum of balance-block weights for `currency` deposits inside
/// `[bn_low, bn_up]`.
///
/// Each deposit at block `b_i` with amount `a_i` weighs
/// `a_i × (b_{i+1} − b_i)`, where `b_{i+1}` is the next in-window deposit's
/// block or `bn_up` for the last one. A deposit landing exactly at `bn_up`
/// contributes zero weight.
#[must_use]
pub fn balance_blocks_in(
    deposits: &[Deposit],
    currency: Currency,
    bn_low: u64,
    bn_up: u64,
) -> Decimal {
    let window: Vec<&Deposit> = deposits
        .iter()
        .filter(|deposit| {
            deposit.currency == currency
                && deposit.block_number >= bn_low
                && deposit.block_number <= bn_up
        })
        .collect();

    let mut weights = Decimal::ZERO;
    for (i, deposit) in window.iter().enumerate() {
        let next_block = window
            .get(i + 1)
            .map_or(bn_up, |next| next.block_number);
        weights += deposit.amount * Decimal::from(next_block - deposit.block_number);
    }
    weights
}

/// The wallet's pro-rata share of a closed accrual pool:
/// `aggregate_accrual × bb_in / (aggregate_active × (bn_up − bn_low))`.
///
/// # Errors
/// - [`DriiphubError::NoBlockSpan`] when `bn_up <= bn_low` (undefined
///   fraction)
/// - [`DriiphubError::NoAccrual`] when the aggregate active pool is empty
pub fn pro_rata_share(
    aggregate_accrual: Decimal,
    aggregate_active: Decimal,
    bb_in: Decimal,
    bn_low: u64,
    bn_up: u64,
) -> Result<Decimal> {
    if bn_up <= bn_low {
        return Err(DriiphubError::NoBlockSpan);
    }
    if aggregate_active.is_zero() {
        return Err(DriiphubError::NoAccrual);
    }
    let block_span = Decimal::from(bn_up - bn_low);
    Ok(aggregate_accrual * bb_in / (aggregate_active * block_span))
}

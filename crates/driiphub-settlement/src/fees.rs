//! Settlement fee computation.
//!
//! Pure functions over block-versioned fee schedules: a flat nominal rate,
//! an optional discount bracket keyed on the settled amount, and a minimum
//! fee floor. Deterministic given inputs; never mutates state.

use driiphub_types::{Configuration, DriiphubError, FeeRole, FeeSchedule, Result};
use rust_decimal::Decimal;

/// Fee for settling `amount` under `role`, against the schedule in force at
/// `block_number`.
///
/// # Errors
/// Returns [`DriiphubError::NoFeeSchedule`] if no schedule for the role is
/// in force at that block.
pub fn fee(
    config: &Configuration,
    role: FeeRole,
    amount: Decimal,
    block_number: u64,
) -> Result<Decimal> {
    let schedule = config
        .fee_schedule(role, block_number)
        .ok_or(DriiphubError::NoFeeSchedule { block_number })?;
    Ok(schedule_fee(schedule, amount))
}

/// Fee for `amount` under a single schedule entry: nominal rate, minus the
/// best matching discount bracket, floored at the minimum fee.
#[must_use]
pub fn schedule_fee(schedule: &FeeSchedule, amount: Decimal) -> Decimal {
    let mut rate = schedule.nominal_rate;
    let best_tier = schedule
        .discount_tiers
        .iter()
        .filter(|tier| amount >= tier.threshold)
        .max_by(|a, b| a.threshold.cmp(&b.threshold));
    if let Some(tier) = best_tier {
        rate *= Decimal::ONE - tier.discount;
    }
    (amount * rate).max(schedule.minimum_fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use driiphub_types::DiscountTier;

    fn schedule(effective_block: u64) -> FeeSchedule {
        FeeSchedule {
            effective_block,
            nominal_rate: Decimal::new(2, 3), // 0.2%
            discount_tiers: Vec::new(),
            minimum_fee: Decimal::new(2, 4), // 0.0002
        }
    }

    #[test]
    fn flat_rate_applies() {
        let fee = schedule_fee(&schedule(0), Decimal::new(1000, 0));
        assert_eq!(fee, Decimal::new(2, 0)); // 1000 * 0.002
    }

    #[test]
    fn minimum_fee_floors_small_amounts() {
        let fee = schedule_fee(&schedule(0), Decimal::new(1, 2)); // 0.01
        assert_eq!(fee, Decimal::new(2, 4));
    }

    #[test]
    fn best_discount_bracket_wins() {
        let mut sched = schedule(0);
        sched.discount_tiers = vec![
            DiscountTier {
                threshold: Decimal::new(100, 0),
                discount: Decimal::new(1, 1), // 10% off
            },
            DiscountTier {
                threshold: Decimal::new(1000, 0),
                discount: Decimal::new(25, 2), // 25% off
            },
        ];

        // Below every bracket: nominal rate.
        assert_eq!(
            schedule_fee(&sched, Decimal::new(50, 0)),
            Decimal::new(50, 0) * Decimal::new(2, 3)
        );

        // First bracket: 0.002 * 0.9.
        assert_eq!(
            schedule_fee(&sched, Decimal::new(500, 0)),
            Decimal::new(500, 0) * Decimal::new(2, 3) * Decimal::new(9, 1)
        );

        // Second bracket: 0.002 * 0.75.
        assert_eq!(
            schedule_fee(&sched, Decimal::new(2000, 0)),
            Decimal::new(2000, 0) * Decimal::new(2, 3) * Decimal::new(75, 2)
        );
    }

    #[test]
    fn schedule_versioning_by_block() {
        let mut config = Configuration::new();
        config.set_fee_schedule(FeeRole::Payment, schedule(0));
        let mut later = schedule(100);
        later.nominal_rate = Decimal::new(4, 3);
        config.set_fee_schedule(FeeRole::Payment, later);

        let amount = Decimal::new(1000, 0);
        let early = fee(&config, FeeRole::Payment, amount, 50).unwrap();
        let late = fee(&config, FeeRole::Payment, amount, 150).unwrap();
        assert_eq!(early, Decimal::new(2, 0));
        assert_eq!(late, Decimal::new(4, 0));
    }

    #[test]
    fn missing_schedule_errors() {
        let config = Configuration::new();
        let err = fee(&config, FeeRole::TradeMaker, Decimal::ONE, 5).unwrap_err();
        assert!(matches!(err, DriiphubError::NoFeeSchedule { block_number: 5 }));
    }

    #[test]
    fn fee_is_deterministic() {
        let config = Configuration::with_default_fees();
        let a = fee(&config, FeeRole::TradeTaker, Decimal::new(777, 0), 42).unwrap();
        let b = fee(&config, FeeRole::TradeTaker, Decimal::new(777, 0), 42).unwrap();
        assert_eq!(a, b);
    }
}

//! The reserve fund ledger.
//!
//! Tracks per-wallet deposits and active/staged balances, the aggregate
//! active pool per currency, and the accrual of operator-side deposits
//! across periods. Wallet deposits feed the active pool; operator deposits
//! feed the current accrual period and advance the claim window's upper
//! bound. Every operation checks all its preconditions before mutating
//! anything.

use std::collections::HashMap;

use driiphub_types::{
    BalanceEntry, Currency, Deposit, DriiphubError, ReserveEvent, ReserveFund, Result, TransferTx,
    WalletId,
};
use rust_decimal::Decimal;

use crate::accrual;

/// The reserve fund: deposit log, balance triples, and accrual periods.
pub struct ReserveLedger {
    /// The fund operator; its deposits fund accrual.
    operator: WalletId,
    /// Append-only deposit log per wallet, ordered by block height.
    deposits: HashMap<WalletId, Vec<Deposit>>,
    /// Per-(wallet, currency) active/staged balances.
    balances: HashMap<(WalletId, Currency), BalanceEntry>,
    /// Aggregate active balance per currency across all wallets.
    aggregate_active: HashMap<Currency, Decimal>,
    /// Accrual accumulated in the current (open) period.
    period_accrual: HashMap<Currency, Decimal>,
    /// Accrual accumulated across all closed periods.
    aggregate_accrual: HashMap<Currency, Decimal>,
    /// Most recent block at which an operator deposit increased accrual;
    /// the upper bound of every claim window.
    last_operator_deposit_block: u64,
    /// Block height of the most recent period close.
    last_close_block: u64,
    /// Per-(wallet, currency) lower bound for the next claim.
    claim_floors: HashMap<(WalletId, Currency), u64>,
    events: Vec<ReserveEvent>,
}

impl ReserveLedger {
    /// Create an empty reserve fund operated by `operator`.
    #[must_use]
    pub fn new(operator: WalletId) -> Self {
        Self {
            operator,
            deposits: HashMap::new(),
            balances: HashMap::new(),
            aggregate_active: HashMap::new(),
            period_accrual: HashMap::new(),
            aggregate_accrual: HashMap::new(),
            last_operator_deposit_block: 0,
            last_close_block: 0,
            claim_floors: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The fund operator.
    #[must_use]
    pub fn operator(&self) -> WalletId {
        self.operator
    }

    // =====================================================================
    // Deposits
    // =====================================================================

    /// Deposit the native asset.
    pub fn deposit_native(
        &mut self,
        wallet: WalletId,
        amount: Decimal,
        block_number: u64,
    ) -> Result<()> {
        self.deposit(wallet, Currency::NATIVE, amount, block_number)
    }

    /// Deposit a token. The currency handle must not be the native zero
    /// handle.
    pub fn deposit_tokens(
        &mut self,
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
        block_number: u64,
    ) -> Result<()> {
        if currency.is_native() {
            return Err(DriiphubError::ZeroAddress);
        }
        self.deposit(wallet, currency, amount, block_number)
    }

    fn deposit(
        &mut self,
        wallet: WalletId,
        currency: Currency,
        amount: Decimal,
        block_number: u64,
    ) -> Result<()> {
        if wallet.is_zero() {
            return Err(DriiphubError::ZeroAddress);
        }
        if amount <= Decimal::ZERO {
            return Err(DriiphubError::ZeroAmount);
        }

        self.deposits.entry(wallet).or_default().push(Deposit {
            amount,
            currency,
            block_number,
        });

        if wallet == self.operator {
            // Operator deposits fund the open accrual period.
            *self.period_accrual.entry(currency).or_insert(Decimal::ZERO) += amount;
            if block_number > self.last_operator_deposit_block {
                self.last_operator_deposit_block = block_number;
            }
        } else {
            let entry = self.balances.entry((wallet, currency)).or_default();
            entry.active += amount;
            *self
                .aggregate_active
                .entry(currency)
                .or_insert(Decimal::ZERO) += amount;
        }

        self.events.push(ReserveEvent::Deposited {
            wallet,
            currency,
            amount,
            block_number,
        });
        Ok(())
    }

    /// The wallet's deposit record at `index`.
    pub fn deposit_at(&self, wallet: WalletId, index: usize) -> Result<&Deposit> {
        self.deposits
            .get(&wallet)
            .and_then(|log| log.get(index))
            .ok_or(DriiphubError::DepositNotFound { wallet, index })
    }

    /// Number of deposits recorded for `wallet`.
    pub fn deposit_count(&self, wallet: WalletId) -> Result<usize> {
        if wallet.is_zero() {
            return Err(DriiphubError::ZeroAddress);
        }
        Ok(self.deposits.get(&wallet).map_or(0, Vec::len))
    }

    // =====================================================================
    // Balances
    // =====================================================================

    /// The wallet's active balance for a currency.
    #[must_use]
    pub fn active_balance(&self, wallet: WalletId, currency: Currency) -> Decimal {
        self.balances
            .get(&(wallet, currency))
            .map_or(Decimal::ZERO, |entry| entry.active)
    }

    /// The wallet's staged balance for a currency.
    #[must_use]
    pub fn staged_balance(&self, wallet: WalletId, currency: Currency) -> Decimal {
        self.balances
            .get(&(wallet, currency))
            .map_or(Decimal::ZERO, |entry| entry.staged)
    }

    /// The aggregate active pool for a currency.
    #[must_use]
    pub fn aggregate_active_balance(&self, currency: Currency) -> Decimal {
        self.aggregate_active
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Accrual accumulated in the open period for a currency.
    #[must_use]
    pub fn period_accrual_balance(&self, currency: Currency) -> Decimal {
        self.period_accrual
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Accrual accumulated across all closed periods for a currency.
    #[must_use]
    pub fn aggregate_accrual_balance(&self, currency: Currency) -> Decimal {
        self.aggregate_accrual
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Move active balance to the wallet's staged (withdrawable) balance.
    /// The fund operator may not stage on its own behalf.
    pub fn stage(&mut self, wallet: WalletId, currency: Currency, amount: Decimal) -> Result<()> {
        if wallet == self.operator {
            return Err(DriiphubError::OperatorMayNotStage);
        }
        if amount <= Decimal::ZERO {
            return Err(DriiphubError::ZeroAmount);
        }
        let available = self.active_balance(wallet, currency);
        if available < amount {
            return Err(DriiphubError::InsufficientActive {
                needed: amount,
                available,
            });
        }

        let entry = self.balances.entry((wallet, currency)).or_default();
        entry.active -= amount;
        entry.staged += amount;
        self.events.push(ReserveEvent::Staged {
            wallet,
            currency,
            amount,
        });
        Ok(())
    }

    /// Withdraw staged balance. The external asset transfer follows the
    /// emitted event.
    pub fn withdraw(&mut self, wallet: WalletId, currency: Currency, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(DriiphubError::ZeroAmount);
        }
        let available = self.staged_balance(wallet, currency);
        if available < amount {
            return Err(DriiphubError::InsufficientStaged {
                needed: amount,
                available,
            });
        }

        let entry = self.balances.entry((wallet, currency)).or_default();
        entry.staged -= amount;
        self.events.push(ReserveEvent::Withdrawn {
            wallet,
            currency,
            amount,
        });
        Ok(())
    }

    // =====================================================================
    // Accrual periods
    // =====================================================================

    /// Close the open accrual period: fold every currency's period accrual
    /// into the aggregate accrual and record the closing block.
    /// Operator-only.
    pub fn close_accrual_period(&mut self, caller: WalletId, block_number: u64) -> Result<()> {
        if caller != self.operator {
            return Err(DriiphubError::Unauthorized { role: "operator" });
        }
        for (currency, amount) in self.period_accrual.drain() {
            *self
                .aggregate_accrual
                .entry(currency)
                .or_insert(Decimal::ZERO) += amount;
        }
        self.last_close_block = block_number;
        self.events
            .push(ReserveEvent::AccrualPeriodClosed { block_number });
        tracing::info!(block_number, "accrual period closed");
        Ok(())
    }

    /// Block height of the most recent period close.
    #[must_use]
    pub fn last_close_block(&self) -> u64 {
        self.last_close_block
    }

    /// Claim the wallet's pro-rata share of the closed accrual pool for a
    /// currency, staging it to the wallet.
    ///
    /// The claim window runs from the wallet's last claim (genesis if it
    /// never claimed) to the most recent operator deposit block. The share
    /// is weighted by the wallet's balance-blocks inside that window; the
    /// aggregate active pool shrinks by the claimed amount while the
    /// aggregate accrual stays untouched until the next period close.
    pub fn claim_accrual(&mut self, wallet: WalletId, currency: Currency) -> Result<Decimal> {
        let aggregate_accrual = self.aggregate_accrual_balance(currency);
        if aggregate_accrual.is_zero() {
            return Err(DriiphubError::NoAccrual);
        }
        let aggregate_active = self.aggregate_active_balance(currency);

        let bn_low = self
            .claim_floors
            .get(&(wallet, currency))
            .copied()
            .unwrap_or(0);
        let bn_up = self.last_operator_deposit_block;
        if bn_up == bn_low {
            return Err(DriiphubError::NoBlockSpan);
        }

        let log = self.deposits.get(&wallet).map_or(&[][..], Vec::as_slice);
        let bb_in = accrual::balance_blocks_in(log, currency, bn_low, bn_up);
        let share =
            accrual::pro_rata_share(aggregate_accrual, aggregate_active, bb_in, bn_low, bn_up)?;

        self.balances.entry((wallet, currency)).or_default().staged += share;
        *self
            .aggregate_active
            .entry(currency)
            .or_insert(Decimal::ZERO) -= share;
        self.claim_floors.insert((wallet, currency), bn_up);

        self.events.push(ReserveEvent::AccrualClaimed {
            wallet,
            currency,
            amount: share,
        });
        Ok(share)
    }

    // =====================================================================
    // Two-way transfers
    // =====================================================================

    /// Whether the aggregate active pool covers an outbound leg.
    #[must_use]
    pub fn supports_outbound_transfer(&self, tx: &TransferTx) -> bool {
        self.aggregate_active_balance(tx.currency) >= tx.amount
    }

    /// Atomically swap the wallet's staged `inbound` leg for the pool's
    /// `outbound` leg. Operator-only; all four balance adjustments happen
    /// or none do.
    pub fn execute_two_way_transfer(
        &mut self,
        caller: WalletId,
        wallet: WalletId,
        inbound: &TransferTx,
        outbound: &TransferTx,
    ) -> Result<()> {
        if caller != self.operator {
            return Err(DriiphubError::Unauthorized { role: "operator" });
        }
        if inbound.amount <= Decimal::ZERO || outbound.amount <= Decimal::ZERO {
            return Err(DriiphubError::ZeroAmount);
        }
        let pool = self.aggregate_active_balance(outbound.currency);
        if outbound.amount > pool {
            return Err(DriiphubError::InsufficientAggregate {
                needed: outbound.amount,
                available: pool,
            });
        }
        let staged = self.staged_balance(wallet, inbound.currency);
        if inbound.amount > staged {
            return Err(DriiphubError::InsufficientStaged {
                needed: inbound.amount,
                available: staged,
            });
        }

        // Preconditions hold; apply all four adjustments.
        self.balances
            .entry((wallet, inbound.currency))
            .or_default()
            .staged -= inbound.amount;
        *self
            .aggregate_active
            .entry(inbound.currency)
            .or_insert(Decimal::ZERO) += inbound.amount;
        self.balances
            .entry((wallet, outbound.currency))
            .or_default()
            .staged += outbound.amount;
        *self
            .aggregate_active
            .entry(outbound.currency)
            .or_insert(Decimal::ZERO) -= outbound.amount;

        self.events.push(ReserveEvent::TwoWayTransferred {
            wallet,
            inbound: *inbound,
            outbound: *outbound,
        });
        Ok(())
    }

    /// The event log, in emission order.
    #[must_use]
    pub fn events(&self) -> &[ReserveEvent] {
        &self.events
    }
}

impl ReserveFund for ReserveLedger {
    fn outbound_transfer_supported(&self, tx: &TransferTx) -> bool {
        self.supports_outbound_transfer(tx)
    }

    fn two_way_transfer(
        &mut self,
        wallet: WalletId,
        inbound: &TransferTx,
        outbound: &TransferTx,
    ) -> Result<()> {
        let operator = self.operator;
        self.execute_two_way_transfer(operator, wallet, inbound, outbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Currency {
        Currency::token([0xAA; 20])
    }

    fn ledger() -> (ReserveLedger, WalletId) {
        let operator = WalletId::random();
        (ReserveLedger::new(operator), operator)
    }

    #[test]
    fn wallet_deposit_feeds_active_and_aggregate() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(47, 1), 100)
            .unwrap();

        assert_eq!(
            ledger.active_balance(wallet, Currency::NATIVE),
            Decimal::new(47, 1)
        );
        assert_eq!(
            ledger.aggregate_active_balance(Currency::NATIVE),
            Decimal::new(47, 1)
        );
        assert_eq!(
            ledger.period_accrual_balance(Currency::NATIVE),
            Decimal::ZERO
        );
    }

    #[test]
    fn operator_deposit_feeds_period_accrual() {
        let (mut ledger, operator) = ledger();
        ledger
            .deposit_native(operator, Decimal::new(3, 0), 120)
            .unwrap();

        assert_eq!(
            ledger.period_accrual_balance(Currency::NATIVE),
            Decimal::new(3, 0)
        );
        assert_eq!(
            ledger.aggregate_active_balance(Currency::NATIVE),
            Decimal::ZERO
        );
        assert_eq!(ledger.active_balance(operator, Currency::NATIVE), Decimal::ZERO);
    }

    #[test]
    fn zero_amount_deposit_rejected() {
        let (mut ledger, _) = ledger();
        let err = ledger
            .deposit_native(WalletId::random(), Decimal::ZERO, 1)
            .unwrap_err();
        assert!(matches!(err, DriiphubError::ZeroAmount));
    }

    #[test]
    fn token_deposit_with_native_handle_rejected() {
        let (mut ledger, _) = ledger();
        let err = ledger
            .deposit_tokens(WalletId::random(), Currency::NATIVE, Decimal::ONE, 1)
            .unwrap_err();
        assert!(matches!(err, DriiphubError::ZeroAddress));
    }

    #[test]
    fn deposit_log_is_index_stable() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(25, 2), 100)
            .unwrap();
        ledger
            .deposit_tokens(wallet, token(), Decimal::new(10, 0), 105)
            .unwrap();

        assert_eq!(ledger.deposit_count(wallet).unwrap(), 2);

        let first = ledger.deposit_at(wallet, 0).unwrap();
        assert_eq!(first.amount, Decimal::new(25, 2));
        assert_eq!(first.currency, Currency::NATIVE);
        assert_eq!(first.block_number, 100);

        let second = ledger.deposit_at(wallet, 1).unwrap();
        assert_eq!(second.currency, token());
        assert_eq!(second.block_number, 105);

        assert!(matches!(
            ledger.deposit_at(wallet, 999).unwrap_err(),
            DriiphubError::DepositNotFound { index: 999, .. }
        ));
        assert!(matches!(
            ledger.deposit_count(WalletId::ZERO).unwrap_err(),
            DriiphubError::ZeroAddress
        ));
    }

    #[test]
    fn stage_moves_active_to_staged_locally() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_tokens(wallet, token(), Decimal::new(5, 0), 100)
            .unwrap();
        ledger.stage(wallet, token(), Decimal::ONE).unwrap();

        assert_eq!(ledger.active_balance(wallet, token()), Decimal::new(4, 0));
        assert_eq!(ledger.staged_balance(wallet, token()), Decimal::ONE);
        // Staging is wallet-local; the aggregate pool is untouched.
        assert_eq!(ledger.aggregate_active_balance(token()), Decimal::new(5, 0));
    }

    #[test]
    fn operator_may_not_stage() {
        let (mut ledger, operator) = ledger();
        let err = ledger.stage(operator, token(), Decimal::ONE).unwrap_err();
        assert!(matches!(err, DriiphubError::OperatorMayNotStage));
    }

    #[test]
    fn stage_beyond_active_rejected() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_tokens(wallet, token(), Decimal::ONE, 100)
            .unwrap();
        let err = ledger.stage(wallet, token(), Decimal::new(2, 0)).unwrap_err();
        assert!(matches!(err, DriiphubError::InsufficientActive { .. }));
        // Nothing moved.
        assert_eq!(ledger.active_balance(wallet, token()), Decimal::ONE);
        assert_eq!(ledger.staged_balance(wallet, token()), Decimal::ZERO);
    }

    #[test]
    fn stage_then_withdraw_round_trip() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(10, 0), 100)
            .unwrap();
        let active_before = ledger.active_balance(wallet, Currency::NATIVE);

        ledger.stage(wallet, Currency::NATIVE, Decimal::new(3, 0)).unwrap();
        ledger
            .withdraw(wallet, Currency::NATIVE, Decimal::new(3, 0))
            .unwrap();

        assert_eq!(
            ledger.active_balance(wallet, Currency::NATIVE),
            active_before - Decimal::new(3, 0)
        );
        assert_eq!(ledger.staged_balance(wallet, Currency::NATIVE), Decimal::ZERO);
        assert!(ledger.events().contains(&ReserveEvent::Withdrawn {
            wallet,
            currency: Currency::NATIVE,
            amount: Decimal::new(3, 0),
        }));
    }

    #[test]
    fn withdraw_beyond_staged_rejected() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(10, 0), 100)
            .unwrap();
        ledger.stage(wallet, Currency::NATIVE, Decimal::ONE).unwrap();

        let err = ledger
            .withdraw(wallet, Currency::NATIVE, Decimal::new(2, 0))
            .unwrap_err();
        assert!(matches!(err, DriiphubError::InsufficientStaged { .. }));
    }

    #[test]
    fn close_accrual_period_is_operator_only() {
        let (mut ledger, _) = ledger();
        let err = ledger
            .close_accrual_period(WalletId::random(), 200)
            .unwrap_err();
        assert!(matches!(err, DriiphubError::Unauthorized { role: "operator" }));
    }

    #[test]
    fn close_accrual_period_folds_and_resets() {
        let (mut ledger, operator) = ledger();
        ledger
            .deposit_native(operator, Decimal::new(3, 0), 120)
            .unwrap();
        ledger
            .deposit_tokens(operator, token(), Decimal::new(50, 0), 125)
            .unwrap();

        ledger.close_accrual_period(operator, 130).unwrap();

        assert_eq!(
            ledger.period_accrual_balance(Currency::NATIVE),
            Decimal::ZERO
        );
        assert_eq!(ledger.period_accrual_balance(token()), Decimal::ZERO);
        assert_eq!(
            ledger.aggregate_accrual_balance(Currency::NATIVE),
            Decimal::new(3, 0)
        );
        assert_eq!(
            ledger.aggregate_accrual_balance(token()),
            Decimal::new(50, 0)
        );
        assert_eq!(ledger.last_close_block(), 130);

        // A second close with an empty period accrues nothing further.
        ledger.close_accrual_period(operator, 140).unwrap();
        assert_eq!(
            ledger.aggregate_accrual_balance(Currency::NATIVE),
            Decimal::new(3, 0)
        );
    }

    #[test]
    fn claim_accrual_without_pool_rejected() {
        let (mut ledger, _) = ledger();
        let err = ledger
            .claim_accrual(WalletId::random(), token())
            .unwrap_err();
        assert!(matches!(err, DriiphubError::NoAccrual));
    }

    #[test]
    fn claim_accrual_stages_pro_rata_share() {
        let (mut ledger, operator) = ledger();
        let wallet = WalletId::random();
        let other = WalletId::random();

        // Pool liquidity from two wallets.
        ledger
            .deposit_native(wallet, Decimal::new(300, 0), 100)
            .unwrap();
        ledger
            .deposit_native(wallet, Decimal::new(120, 0), 102)
            .unwrap();
        ledger
            .deposit_native(wallet, Decimal::new(400, 0), 105)
            .unwrap();
        ledger
            .deposit_native(other, Decimal::new(180, 0), 101)
            .unwrap();

        // Operator funds accrual; its last deposit caps the claim window.
        ledger
            .deposit_native(operator, Decimal::new(50, 0), 110)
            .unwrap();
        ledger.close_accrual_period(operator, 111).unwrap();

        let aggregate_active = ledger.aggregate_active_balance(Currency::NATIVE);
        assert_eq!(aggregate_active, Decimal::new(1000, 0));

        // bn_low=0, bn_up=110:
        // bb_in = 300*(102-100) + 120*(105-102) + 400*(110-105) = 2960
        // share = 50 * 2960 / (1000 * 110)
        let expected = Decimal::new(50, 0) * Decimal::new(2960, 0)
            / (Decimal::new(1000, 0) * Decimal::new(110, 0));
        let share = ledger.claim_accrual(wallet, Currency::NATIVE).unwrap();
        assert_eq!(share, expected);

        assert_eq!(ledger.staged_balance(wallet, Currency::NATIVE), expected);
        assert_eq!(
            ledger.aggregate_active_balance(Currency::NATIVE),
            aggregate_active - expected
        );
        // Individual claims never touch the aggregate accrual.
        assert_eq!(
            ledger.aggregate_accrual_balance(Currency::NATIVE),
            Decimal::new(50, 0)
        );
    }

    #[test]
    fn repeat_claim_without_new_window_rejected() {
        let (mut ledger, operator) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(100, 0), 100)
            .unwrap();
        ledger
            .deposit_native(operator, Decimal::new(10, 0), 110)
            .unwrap();
        ledger.close_accrual_period(operator, 111).unwrap();

        ledger.claim_accrual(wallet, Currency::NATIVE).unwrap();

        // The claim floor advanced to bn_up; no span is left.
        let err = ledger.claim_accrual(wallet, Currency::NATIVE).unwrap_err();
        assert!(matches!(err, DriiphubError::NoBlockSpan));
    }

    #[test]
    fn outbound_transfer_supported_is_a_liquidity_check() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(8, 0), 100)
            .unwrap();

        assert!(ledger.supports_outbound_transfer(&TransferTx::new(
            Currency::NATIVE,
            Decimal::new(8, 0)
        )));
        assert!(!ledger.supports_outbound_transfer(&TransferTx::new(
            Currency::NATIVE,
            Decimal::new(9, 0)
        )));
        assert!(!ledger
            .supports_outbound_transfer(&TransferTx::new(token(), Decimal::ONE)));
    }

    #[test]
    fn two_way_transfer_swaps_all_four_balances() {
        let (mut ledger, operator) = ledger();
        let wallet = WalletId::random();
        let other = WalletId::random();

        // Wallet stages native; the pool holds tokens from another wallet.
        ledger
            .deposit_native(wallet, Decimal::new(5, 0), 100)
            .unwrap();
        ledger.stage(wallet, Currency::NATIVE, Decimal::new(2, 0)).unwrap();
        ledger
            .deposit_tokens(other, token(), Decimal::new(15, 0), 101)
            .unwrap();

        let inbound = TransferTx::new(Currency::NATIVE, Decimal::ONE);
        let outbound = TransferTx::new(token(), Decimal::new(10, 0));

        let staged_native = ledger.staged_balance(wallet, Currency::NATIVE);
        let staged_token = ledger.staged_balance(wallet, token());
        let pool_native = ledger.aggregate_active_balance(Currency::NATIVE);
        let pool_token = ledger.aggregate_active_balance(token());

        ledger
            .execute_two_way_transfer(operator, wallet, &inbound, &outbound)
            .unwrap();

        assert_eq!(
            ledger.staged_balance(wallet, Currency::NATIVE),
            staged_native - inbound.amount
        );
        assert_eq!(
            ledger.staged_balance(wallet, token()),
            staged_token + outbound.amount
        );
        assert_eq!(
            ledger.aggregate_active_balance(Currency::NATIVE),
            pool_native + inbound.amount
        );
        assert_eq!(
            ledger.aggregate_active_balance(token()),
            pool_token - outbound.amount
        );
    }

    #[test]
    fn two_way_transfer_is_operator_only() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        let err = ledger
            .execute_two_way_transfer(
                wallet,
                wallet,
                &TransferTx::new(Currency::NATIVE, Decimal::ONE),
                &TransferTx::new(token(), Decimal::ONE),
            )
            .unwrap_err();
        assert!(matches!(err, DriiphubError::Unauthorized { role: "operator" }));
    }

    #[test]
    fn two_way_transfer_rejects_zero_legs() {
        let (mut ledger, operator) = ledger();
        let wallet = WalletId::random();
        for (inbound, outbound) in [
            (Decimal::ZERO, Decimal::ONE),
            (Decimal::ONE, Decimal::ZERO),
        ] {
            let err = ledger
                .execute_two_way_transfer(
                    operator,
                    wallet,
                    &TransferTx::new(Currency::NATIVE, inbound),
                    &TransferTx::new(token(), outbound),
                )
                .unwrap_err();
            assert!(matches!(err, DriiphubError::ZeroAmount));
        }
    }

    #[test]
    fn two_way_transfer_fails_atomically() {
        let (mut ledger, operator) = ledger();
        let wallet = WalletId::random();
        let other = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(5, 0), 100)
            .unwrap();
        ledger.stage(wallet, Currency::NATIVE, Decimal::ONE).unwrap();
        ledger
            .deposit_tokens(other, token(), Decimal::new(15, 0), 101)
            .unwrap();

        // Outbound leg exceeds the pool.
        let err = ledger
            .execute_two_way_transfer(
                operator,
                wallet,
                &TransferTx::new(Currency::NATIVE, Decimal::ONE),
                &TransferTx::new(token(), Decimal::new(9999, 0)),
            )
            .unwrap_err();
        assert!(matches!(err, DriiphubError::InsufficientAggregate { .. }));

        // Inbound leg exceeds the wallet's staged balance.
        let err = ledger
            .execute_two_way_transfer(
                operator,
                wallet,
                &TransferTx::new(Currency::NATIVE, Decimal::new(40_000, 0)),
                &TransferTx::new(token(), Decimal::ONE),
            )
            .unwrap_err();
        assert!(matches!(err, DriiphubError::InsufficientStaged { .. }));

        // No partial change from either failure.
        assert_eq!(ledger.staged_balance(wallet, Currency::NATIVE), Decimal::ONE);
        assert_eq!(ledger.staged_balance(wallet, token()), Decimal::ZERO);
        assert_eq!(
            ledger.aggregate_active_balance(Currency::NATIVE),
            Decimal::new(5, 0)
        );
        assert_eq!(ledger.aggregate_active_balance(token()), Decimal::new(15, 0));
    }

    #[test]
    fn reserve_fund_trait_uses_operator_authority() {
        let (mut ledger, _) = ledger();
        let wallet = WalletId::random();
        let other = WalletId::random();
        ledger
            .deposit_native(wallet, Decimal::new(5, 0), 100)
            .unwrap();
        ledger.stage(wallet, Currency::NATIVE, Decimal::new(2, 0)).unwrap();
        ledger
            .deposit_tokens(other, token(), Decimal::new(15, 0), 101)
            .unwrap();

        let reserve: &mut dyn ReserveFund = &mut ledger;
        let inbound = TransferTx::new(Currency::NATIVE, Decimal::ONE);
        let outbound = TransferTx::new(token(), Decimal::ONE);
        assert!(reserve.outbound_transfer_supported(&outbound));
        reserve.two_way_transfer(wallet, &inbound, &outbound).unwrap();

        assert_eq!(ledger.staged_balance(wallet, token()), Decimal::ONE);
    }
}

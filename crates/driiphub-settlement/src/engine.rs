//! The settlement engine — central state machine of the settlement plane.
//!
//! A settle call runs: collaborator presence → seal/fraud/party/community
//! integrity checks → replay guard → challenge-result branching. Qualified
//! driips move balances through the custody collaborator (with the reserve
//! fund standing in when custody cannot complete the wallet's incoming
//! leg), withdraw the fee to the revenue fund, raise nonce watermarks, and
//! upsert the settlement record keyed by driip nonce. Disqualified driips
//! seize the wallet for the challenger — a terminal outcome, not an error.
//!
//! All checks precede all engine-state mutation: a rejected call leaves the
//! engine exactly as it was.

use std::collections::HashMap;

use driiphub_types::{
    ClientFund, CommunityVote, Configuration, Currency, Driip, DriipType, DriiphubError, FeeRole,
    FraudChallenge, LiquidityRole, Payment, ProposalStatus, ReserveFund, Result,
    SettlementChallenge, SettlementEvent, SettlementParty, SettlementRecord, Trade, TransferTx,
    Validator, WalletId,
};

use crate::{fees, nonce_ledger::NonceLedger, seizure::SeizureRegistry};

/// Terminal outcome of a settle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The wallet's leg settled.
    Settled,
    /// The challenge disqualified the proposal; the wallet was seized.
    Seized { challenger: WalletId },
}

/// Orchestrates driip settlement against injected collaborators.
///
/// Collaborator references start unset and are installed through the
/// deployer-gated admin operations; any settle call with a missing
/// collaborator is rejected before any other check.
pub struct SettlementEngine {
    deployer: WalletId,
    operator: WalletId,
    configuration: Option<Configuration>,
    validator: Option<Box<dyn Validator>>,
    fraud_challenge: Option<Box<dyn FraudChallenge>>,
    community_vote: Option<Box<dyn CommunityVote>>,
    client_fund: Option<Box<dyn ClientFund>>,
    settlement_challenge: Option<Box<dyn SettlementChallenge>>,
    reserve_fund: Option<Box<dyn ReserveFund>>,
    trades_revenue_fund: Option<WalletId>,
    payments_revenue_fund: Option<WalletId>,
    community_vote_update_disabled: bool,
    nonces: NonceLedger,
    seizures: SeizureRegistry,
    settlements: Vec<SettlementRecord>,
    by_nonce: HashMap<u64, usize>,
    by_wallet: HashMap<WalletId, Vec<usize>>,
    by_wallet_nonce: HashMap<(WalletId, u64), usize>,
    events: Vec<SettlementEvent>,
}

impl SettlementEngine {
    /// Create an engine owned by `deployer` (also the initial operator),
    /// with no collaborators attached.
    #[must_use]
    pub fn new(deployer: WalletId) -> Self {
        Self {
            deployer,
            operator: deployer,
            configuration: None,
            validator: None,
            fraud_challenge: None,
            community_vote: None,
            client_fund: None,
            settlement_challenge: None,
            reserve_fund: None,
            trades_revenue_fund: None,
            payments_revenue_fund: None,
            community_vote_update_disabled: false,
            nonces: NonceLedger::new(),
            seizures: SeizureRegistry::new(),
            settlements: Vec::new(),
            by_nonce: HashMap::new(),
            by_wallet: HashMap::new(),
            by_wallet_nonce: HashMap::new(),
            events: Vec::new(),
        }
    }

    // =====================================================================
    // Settlement
    // =====================================================================

    /// Settle the caller's side of a sealed driip.
    pub fn settle(&mut self, caller: WalletId, driip: &Driip) -> Result<SettlementOutcome> {
        match driip {
            Driip::Trade(trade) => self.settle_trade(caller, trade),
            Driip::Payment(payment) => self.settle_payment(caller, payment),
        }
    }

    /// Settle `wallet`'s side of a sealed driip on its behalf.
    /// Operator-only.
    pub fn settle_by_proxy(
        &mut self,
        caller: WalletId,
        wallet: WalletId,
        driip: &Driip,
    ) -> Result<SettlementOutcome> {
        match driip {
            Driip::Trade(trade) => self.settle_trade_by_proxy(caller, wallet, trade),
            Driip::Payment(payment) => self.settle_payment_by_proxy(caller, wallet, payment),
        }
    }

    /// Settle the caller's side of a sealed trade.
    pub fn settle_trade(&mut self, caller: WalletId, trade: &Trade) -> Result<SettlementOutcome> {
        self.settle_trade_for(caller, trade, false)
    }

    /// Settle `wallet`'s side of a sealed trade on its behalf. Operator-only.
    pub fn settle_trade_by_proxy(
        &mut self,
        caller: WalletId,
        wallet: WalletId,
        trade: &Trade,
    ) -> Result<SettlementOutcome> {
        self.require_operator(caller)?;
        self.settle_trade_for(wallet, trade, true)
    }

    /// Settle the caller's side of a sealed payment.
    pub fn settle_payment(
        &mut self,
        caller: WalletId,
        payment: &Payment,
    ) -> Result<SettlementOutcome> {
        self.settle_payment_for(caller, payment, false)
    }

    /// Settle `wallet`'s side of a sealed payment on its behalf.
    /// Operator-only.
    pub fn settle_payment_by_proxy(
        &mut self,
        caller: WalletId,
        wallet: WalletId,
        payment: &Payment,
    ) -> Result<SettlementOutcome> {
        self.require_operator(caller)?;
        self.settle_payment_for(wallet, payment, true)
    }

    fn settle_trade_for(
        &mut self,
        wallet: WalletId,
        trade: &Trade,
        by_proxy: bool,
    ) -> Result<SettlementOutcome> {
        let validator = self
            .validator
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("validator"))?;
        let fraud = self
            .fraud_challenge
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("fraud challenge"))?;
        let community = self
            .community_vote
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("community vote"))?;
        let config = self
            .configuration
            .as_ref()
            .ok_or(DriiphubError::UninitializedCollaborator("configuration"))?;
        if self.client_fund.is_none() {
            return Err(DriiphubError::UninitializedCollaborator("client fund"));
        }
        let challenge = self.settlement_challenge.as_deref().ok_or(
            DriiphubError::UninitializedCollaborator("settlement challenge"),
        )?;
        let revenue_fund = self
            .trades_revenue_fund
            .ok_or(DriiphubError::UninitializedCollaborator("trades revenue fund"))?;

        if !validator.is_genuine_trade_seal(trade) {
            return Err(DriiphubError::SealInvalid);
        }
        if fraud.is_fraudulent_trade_hash(&trade.seal.hash) {
            return Err(DriiphubError::FraudulentDriip(trade.seal.hash));
        }
        if !validator.is_trade_party(trade, wallet) {
            return Err(DriiphubError::NotDriipParty(wallet));
        }
        if community.is_double_spender_wallet(wallet) {
            return Err(DriiphubError::DoubleSpenderWallet(wallet));
        }

        self.check_not_replayed(
            wallet,
            trade.nonce,
            &[trade.intended_currency, trade.conjugate_currency],
        )?;

        if challenge.proposal_nonce(wallet) != Some(trade.nonce) {
            return Err(DriiphubError::NoSettlementProposal {
                wallet,
                nonce: trade.nonce,
            });
        }

        match challenge.proposal_status(wallet, trade.nonce) {
            ProposalStatus::Unresolved => Err(DriiphubError::NoSettlementProposal {
                wallet,
                nonce: trade.nonce,
            }),

            ProposalStatus::Disqualified => {
                let challenger = challenge
                    .proposal_challenger(wallet, trade.nonce)
                    .ok_or_else(|| {
                        DriiphubError::Internal("disqualified proposal without challenger".into())
                    })?;
                self.seize_wallet(wallet, challenger)?;
                Ok(SettlementOutcome::Seized { challenger })
            }

            ProposalStatus::Qualified => {
                self.check_consistency_guards(config, community, trade.nonce)?;

                let party = trade
                    .party(wallet)
                    .ok_or(DriiphubError::NotDriipParty(wallet))?;
                // The buyer's incoming leg is the intended currency; the
                // seller's is the conjugate.
                let (incoming, outgoing) = if trade.is_buyer(wallet) {
                    (
                        TransferTx::new(trade.intended_currency, party.intended),
                        TransferTx::new(trade.conjugate_currency, party.conjugate),
                    )
                } else {
                    (
                        TransferTx::new(trade.conjugate_currency, party.conjugate),
                        TransferTx::new(trade.intended_currency, party.intended),
                    )
                };
                let role = match party.role {
                    LiquidityRole::Maker => FeeRole::TradeMaker,
                    LiquidityRole::Taker => FeeRole::TradeTaker,
                };
                let fee_amount = fees::fee(config, role, incoming.amount, trade.block_number)?;

                let leg_event =
                    self.transfer_with_reserve(wallet, trade.nonce, &incoming, &outgoing)?;
                let fund = self
                    .client_fund
                    .as_mut()
                    .ok_or(DriiphubError::UninitializedCollaborator("client fund"))?;
                fund.withdraw_from_deposited_balance(
                    wallet,
                    revenue_fund,
                    fee_amount,
                    incoming.currency,
                )?;

                self.events.push(leg_event);
                self.events.push(SettlementEvent::TotalFeeStaged {
                    wallet,
                    beneficiary: revenue_fund,
                    currency: incoming.currency,
                    amount: fee_amount,
                });

                self.nonces.record(wallet, trade.intended_currency, trade.nonce);
                self.nonces.record(wallet, trade.conjugate_currency, trade.nonce);

                self.upsert_settlement(
                    trade.nonce,
                    DriipType::Trade,
                    SettlementParty::new(trade.seller.nonce, trade.seller.wallet),
                    SettlementParty::new(trade.buyer.nonce, trade.buyer.wallet),
                    wallet,
                );
                self.events.push(SettlementEvent::TradeSettled {
                    wallet,
                    nonce: trade.nonce,
                    by_proxy,
                });
                tracing::info!(wallet = %wallet, nonce = trade.nonce, by_proxy, "trade settled");
                Ok(SettlementOutcome::Settled)
            }
        }
    }

    fn settle_payment_for(
        &mut self,
        wallet: WalletId,
        payment: &Payment,
        by_proxy: bool,
    ) -> Result<SettlementOutcome> {
        let validator = self
            .validator
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("validator"))?;
        let fraud = self
            .fraud_challenge
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("fraud challenge"))?;
        let community = self
            .community_vote
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("community vote"))?;
        let config = self
            .configuration
            .as_ref()
            .ok_or(DriiphubError::UninitializedCollaborator("configuration"))?;
        if self.client_fund.is_none() {
            return Err(DriiphubError::UninitializedCollaborator("client fund"));
        }
        let challenge = self.settlement_challenge.as_deref().ok_or(
            DriiphubError::UninitializedCollaborator("settlement challenge"),
        )?;
        let revenue_fund = self.payments_revenue_fund.ok_or(
            DriiphubError::UninitializedCollaborator("payments revenue fund"),
        )?;

        if !validator.is_genuine_payment_seal(payment) {
            return Err(DriiphubError::SealInvalid);
        }
        if fraud.is_fraudulent_payment_hash(&payment.seal.hash) {
            return Err(DriiphubError::FraudulentDriip(payment.seal.hash));
        }
        if !validator.is_payment_party(payment, wallet) {
            return Err(DriiphubError::NotDriipParty(wallet));
        }
        if community.is_double_spender_wallet(wallet) {
            return Err(DriiphubError::DoubleSpenderWallet(wallet));
        }

        self.check_not_replayed(wallet, payment.nonce, &[payment.currency])?;

        if challenge.proposal_nonce(wallet) != Some(payment.nonce) {
            return Err(DriiphubError::NoSettlementProposal {
                wallet,
                nonce: payment.nonce,
            });
        }

        match challenge.proposal_status(wallet, payment.nonce) {
            ProposalStatus::Unresolved => Err(DriiphubError::NoSettlementProposal {
                wallet,
                nonce: payment.nonce,
            }),

            ProposalStatus::Disqualified => {
                let challenger = challenge
                    .proposal_challenger(wallet, payment.nonce)
                    .ok_or_else(|| {
                        DriiphubError::Internal("disqualified proposal without challenger".into())
                    })?;
                self.seize_wallet(wallet, challenger)?;
                Ok(SettlementOutcome::Seized { challenger })
            }

            ProposalStatus::Qualified => {
                self.check_consistency_guards(config, community, payment.nonce)?;

                let party = payment
                    .party(wallet)
                    .ok_or(DriiphubError::NotDriipParty(wallet))?;
                let settle_amount = party.amount;
                // The sender bears the payment fee, computed on the
                // transferred amount; the recipient pays none.
                let fee_amount = if payment.is_sender(wallet) {
                    Some(fees::fee(
                        config,
                        FeeRole::Payment,
                        payment.amount,
                        payment.block_number,
                    )?)
                } else {
                    None
                };

                let fund = self
                    .client_fund
                    .as_mut()
                    .ok_or(DriiphubError::UninitializedCollaborator("client fund"))?;
                fund.transfer_to_settled_balance(wallet, settle_amount, payment.currency)?;
                if let Some(fee_amount) = fee_amount {
                    fund.withdraw_from_deposited_balance(
                        wallet,
                        revenue_fund,
                        fee_amount,
                        payment.currency,
                    )?;
                }

                self.events.push(SettlementEvent::SettledBalanceUpdated {
                    wallet,
                    currency: payment.currency,
                    amount: settle_amount,
                });
                if let Some(fee_amount) = fee_amount {
                    self.events.push(SettlementEvent::TotalFeeStaged {
                        wallet,
                        beneficiary: revenue_fund,
                        currency: payment.currency,
                        amount: fee_amount,
                    });
                }

                self.nonces.record(wallet, payment.currency, payment.nonce);

                self.upsert_settlement(
                    payment.nonce,
                    DriipType::Payment,
                    SettlementParty::new(payment.sender.nonce, payment.sender.wallet),
                    SettlementParty::new(payment.recipient.nonce, payment.recipient.wallet),
                    wallet,
                );
                self.events.push(SettlementEvent::PaymentSettled {
                    wallet,
                    nonce: payment.nonce,
                    by_proxy,
                });
                tracing::info!(wallet = %wallet, nonce = payment.nonce, by_proxy, "payment settled");
                Ok(SettlementOutcome::Settled)
            }
        }
    }

    /// Replay guard: a wallet may settle a nonce at most once per currency,
    /// and at most once per settlement-record slot.
    fn check_not_replayed(
        &self,
        wallet: WalletId,
        nonce: u64,
        currencies: &[Currency],
    ) -> Result<()> {
        for &currency in currencies {
            if self.nonces.is_settled(wallet, currency, nonce) {
                return Err(DriiphubError::AlreadySettled { wallet, nonce });
            }
        }
        if let Some(&index) = self.by_nonce.get(&nonce) {
            if self.settlements[index]
                .party(wallet)
                .is_some_and(|party| party.done)
            {
                return Err(DriiphubError::AlreadySettled { wallet, nonce });
            }
        }
        Ok(())
    }

    /// Reject settling past the community-agreed state when the system no
    /// longer trusts it.
    fn check_consistency_guards(
        &self,
        config: &Configuration,
        community: &dyn CommunityVote,
        nonce: u64,
    ) -> Result<()> {
        let max_nonce = self.nonces.max_nonce();
        if config.is_operational_mode_exit() && nonce > max_nonce {
            return Err(DriiphubError::ExitModeRestriction { nonce, max_nonce });
        }
        if !community.is_data_available() && nonce > max_nonce {
            return Err(DriiphubError::DataUnavailable { nonce, max_nonce });
        }
        Ok(())
    }

    fn seize_wallet(&mut self, wallet: WalletId, challenger: WalletId) -> Result<()> {
        let fund = self
            .client_fund
            .as_mut()
            .ok_or(DriiphubError::UninitializedCollaborator("client fund"))?;
        fund.seize(wallet, challenger)?;
        self.seizures.record(wallet, challenger);
        self.events.push(SettlementEvent::WalletSeized {
            source: wallet,
            target: challenger,
        });
        tracing::warn!(wallet = %wallet, challenger = %challenger, "settlement disqualified; wallet seized");
        Ok(())
    }

    /// Move the wallet's incoming leg to its settled balance via custody;
    /// if custody cannot complete it and the reserve pool covers the leg,
    /// swap the wallet's outgoing leg against the reserve instead.
    fn transfer_with_reserve(
        &mut self,
        wallet: WalletId,
        nonce: u64,
        incoming: &TransferTx,
        outgoing: &TransferTx,
    ) -> Result<SettlementEvent> {
        let fund = self
            .client_fund
            .as_mut()
            .ok_or(DriiphubError::UninitializedCollaborator("client fund"))?;
        match fund.transfer_to_settled_balance(wallet, incoming.amount, incoming.currency) {
            Ok(()) => Ok(SettlementEvent::SettledBalanceUpdated {
                wallet,
                currency: incoming.currency,
                amount: incoming.amount,
            }),
            Err(custody_err) => {
                let Some(reserve) = self.reserve_fund.as_mut() else {
                    return Err(custody_err);
                };
                if !reserve.outbound_transfer_supported(incoming) {
                    return Err(custody_err);
                }
                reserve.two_way_transfer(wallet, outgoing, incoming)?;
                tracing::debug!(
                    wallet = %wallet,
                    nonce,
                    currency = %incoming.currency,
                    "custody could not complete leg; reserve fund stood in"
                );
                Ok(SettlementEvent::ReserveStandIn {
                    wallet,
                    nonce,
                    currency: incoming.currency,
                    amount: incoming.amount,
                })
            }
        }
    }

    /// Create or merge the settlement record for a driip nonce, marking the
    /// settling wallet's slot done. Both parties are indexed at creation.
    fn upsert_settlement(
        &mut self,
        nonce: u64,
        driip_type: DriipType,
        origin: SettlementParty,
        target: SettlementParty,
        settling_wallet: WalletId,
    ) {
        if let Some(&index) = self.by_nonce.get(&nonce) {
            let record = &mut self.settlements[index];
            if let Some(party) = record.party_mut(settling_wallet) {
                party.done = true;
            }
            record.refresh_sidedness();
        } else {
            let index = self.settlements.len();
            let mut record = SettlementRecord::new(nonce, driip_type, origin, target);
            if let Some(party) = record.party_mut(settling_wallet) {
                party.done = true;
            }
            record.refresh_sidedness();
            self.by_nonce.insert(nonce, index);
            for party in [&record.origin, &record.target] {
                self.by_wallet.entry(party.wallet).or_default().push(index);
                self.by_wallet_nonce.insert((party.wallet, party.nonce), index);
            }
            self.settlements.push(record);
        }
    }

    // =====================================================================
    // Queries
    // =====================================================================

    /// Total number of settlement records.
    #[must_use]
    pub fn settlements_count(&self) -> usize {
        self.settlements.len()
    }

    /// The settlement record at `index`.
    pub fn settlement(&self, index: usize) -> Result<&SettlementRecord> {
        self.settlements
            .get(index)
            .ok_or(DriiphubError::SettlementNotFound)
    }

    /// Whether a settlement record exists for the driip nonce.
    #[must_use]
    pub fn has_settlement_by_nonce(&self, nonce: u64) -> bool {
        self.by_nonce.contains_key(&nonce)
    }

    /// The settlement record for the driip nonce.
    pub fn settlement_by_nonce(&self, nonce: u64) -> Result<&SettlementRecord> {
        self.by_nonce
            .get(&nonce)
            .map(|&index| &self.settlements[index])
            .ok_or(DriiphubError::SettlementNotFound)
    }

    /// Number of settlement records referencing `wallet`.
    #[must_use]
    pub fn settlements_count_by_wallet(&self, wallet: WalletId) -> usize {
        self.by_wallet.get(&wallet).map_or(0, Vec::len)
    }

    /// The wallet's settlement record at `index` in its reference list.
    pub fn settlement_by_wallet_and_index(
        &self,
        wallet: WalletId,
        index: usize,
    ) -> Result<&SettlementRecord> {
        self.by_wallet
            .get(&wallet)
            .and_then(|refs| refs.get(index))
            .map(|&index| &self.settlements[index])
            .ok_or(DriiphubError::SettlementNotFound)
    }

    /// The settlement record holding `wallet`'s slot at its party nonce.
    pub fn settlement_by_wallet_and_nonce(
        &self,
        wallet: WalletId,
        nonce: u64,
    ) -> Result<&SettlementRecord> {
        self.by_wallet_nonce
            .get(&(wallet, nonce))
            .map(|&index| &self.settlements[index])
            .ok_or(DriiphubError::SettlementNotFound)
    }

    /// The wallet's settled-nonce watermark for a currency.
    #[must_use]
    pub fn wallet_currency_max_driip_nonce(&self, wallet: WalletId, currency: Currency) -> u64 {
        self.nonces.watermark(wallet, currency)
    }

    /// The global maximum settled driip nonce.
    #[must_use]
    pub fn max_driip_nonce(&self) -> u64 {
        self.nonces.max_nonce()
    }

    /// Adopt the community vote's max driip nonce, when non-zero.
    pub fn update_max_driip_nonce(&mut self) -> Result<()> {
        let community = self
            .community_vote
            .as_deref()
            .ok_or(DriiphubError::UninitializedCollaborator("community vote"))?;
        let nonce = community.max_driip_nonce();
        if nonce > 0 {
            self.nonces.adopt_max_nonce(nonce);
            self.events
                .push(SettlementEvent::MaxDriipNonceUpdated { nonce });
        }
        Ok(())
    }

    /// Whether `wallet` has ever been seized.
    #[must_use]
    pub fn is_seized_wallet(&self, wallet: WalletId) -> bool {
        self.seizures.is_seized_wallet(wallet)
    }

    /// Number of distinct seized wallets.
    #[must_use]
    pub fn seized_wallets_count(&self) -> usize {
        self.seizures.seized_wallets_count()
    }

    /// The seizure record at `index`, if any.
    #[must_use]
    pub fn seizure(&self, index: usize) -> Option<&crate::seizure::Seizure> {
        self.seizures.seizure(index)
    }

    /// The event log, in emission order.
    #[must_use]
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    // =====================================================================
    // Admin
    // =====================================================================

    /// The current deployer.
    #[must_use]
    pub fn deployer(&self) -> WalletId {
        self.deployer
    }

    /// The current operator.
    #[must_use]
    pub fn operator(&self) -> WalletId {
        self.operator
    }

    /// Whether the community-vote reference is permanently frozen.
    #[must_use]
    pub fn community_vote_update_disabled(&self) -> bool {
        self.community_vote_update_disabled
    }

    fn require_deployer(&self, caller: WalletId) -> Result<()> {
        if caller == self.deployer {
            Ok(())
        } else {
            Err(DriiphubError::Unauthorized { role: "deployer" })
        }
    }

    fn require_operator(&self, caller: WalletId) -> Result<()> {
        if caller == self.operator {
            Ok(())
        } else {
            Err(DriiphubError::Unauthorized { role: "operator" })
        }
    }

    /// Hand the deployer role to another wallet. Deployer-only.
    pub fn change_deployer(&mut self, caller: WalletId, new: WalletId) -> Result<()> {
        self.require_deployer(caller)?;
        let old = self.deployer;
        self.deployer = new;
        self.events
            .push(SettlementEvent::DeployerChanged { old, new });
        Ok(())
    }

    /// Hand the operator role to another wallet. Operator-only.
    pub fn change_operator(&mut self, caller: WalletId, new: WalletId) -> Result<()> {
        self.require_operator(caller)?;
        let old = self.operator;
        self.operator = new;
        self.events
            .push(SettlementEvent::OperatorChanged { old, new });
        Ok(())
    }

    /// Replace the configuration. Deployer-only.
    pub fn change_configuration(
        &mut self,
        caller: WalletId,
        configuration: Configuration,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.configuration = Some(configuration);
        self.events.push(SettlementEvent::ConfigurationChanged);
        Ok(())
    }

    /// Replace the validator. Deployer-only.
    pub fn change_validator(
        &mut self,
        caller: WalletId,
        validator: Box<dyn Validator>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.validator = Some(validator);
        self.events.push(SettlementEvent::ValidatorChanged);
        Ok(())
    }

    /// Replace the fraud challenge. Deployer-only.
    pub fn change_fraud_challenge(
        &mut self,
        caller: WalletId,
        fraud_challenge: Box<dyn FraudChallenge>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.fraud_challenge = Some(fraud_challenge);
        self.events.push(SettlementEvent::FraudChallengeChanged);
        Ok(())
    }

    /// Replace the community vote. Deployer-only; permanently fails after
    /// [`Self::disable_update_of_community_vote`].
    pub fn change_community_vote(
        &mut self,
        caller: WalletId,
        community_vote: Box<dyn CommunityVote>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        if self.community_vote_update_disabled {
            return Err(DriiphubError::CommunityVoteUpdateDisabled);
        }
        self.community_vote = Some(community_vote);
        self.events.push(SettlementEvent::CommunityVoteChanged);
        Ok(())
    }

    /// One-way latch: freeze the community-vote reference forever.
    /// Deployer-only.
    pub fn disable_update_of_community_vote(&mut self, caller: WalletId) -> Result<()> {
        self.require_deployer(caller)?;
        self.community_vote_update_disabled = true;
        self.events
            .push(SettlementEvent::CommunityVoteUpdateDisabled);
        Ok(())
    }

    /// Replace the custody collaborator. Deployer-only.
    pub fn change_client_fund(
        &mut self,
        caller: WalletId,
        client_fund: Box<dyn ClientFund>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.client_fund = Some(client_fund);
        self.events.push(SettlementEvent::ClientFundChanged);
        Ok(())
    }

    /// Replace the settlement challenge. Deployer-only.
    pub fn change_settlement_challenge(
        &mut self,
        caller: WalletId,
        settlement_challenge: Box<dyn SettlementChallenge>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.settlement_challenge = Some(settlement_challenge);
        self.events.push(SettlementEvent::SettlementChallengeChanged);
        Ok(())
    }

    /// Attach or replace the reserve fund. Deployer-only.
    pub fn change_reserve_fund(
        &mut self,
        caller: WalletId,
        reserve_fund: Box<dyn ReserveFund>,
    ) -> Result<()> {
        self.require_deployer(caller)?;
        self.reserve_fund = Some(reserve_fund);
        self.events.push(SettlementEvent::ReserveFundChanged);
        Ok(())
    }

    /// Set the beneficiary of trade fees. Deployer-only.
    pub fn change_trades_revenue_fund(&mut self, caller: WalletId, fund: WalletId) -> Result<()> {
        self.require_deployer(caller)?;
        self.trades_revenue_fund = Some(fund);
        self.events
            .push(SettlementEvent::TradesRevenueFundChanged { fund });
        Ok(())
    }

    /// Set the beneficiary of payment fees. Deployer-only.
    pub fn change_payments_revenue_fund(&mut self, caller: WalletId, fund: WalletId) -> Result<()> {
        self.require_deployer(caller)?;
        self.payments_revenue_fund = Some(fund);
        self.events
            .push(SettlementEvent::PaymentsRevenueFundChanged { fund });
        Ok(())
    }
}

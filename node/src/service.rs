//! The stream service: engines wired to ambient context.
//!
//! Wraps every ledger operation with the clock read and structured logging,
//! and feeds withdrawal outcomes to the reward pool observer. The engines
//! themselves stay log-free.

use rill_ledger::{
    CallContext, CancelOutcome, CreateStreamParams, LedgerSnapshot, StreamLedger, WithdrawOutcome,
};
use rill_settlement::{MultiAssetBackend, NativeBackend, SettlementRouter, SingleAssetBackend};
use rill_types::{Address, AssetRef, Clock, StreamId, TokenAmount};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::rewards::RewardPool;

pub struct StreamService<C, N, S, M> {
    ledger: StreamLedger,
    router: SettlementRouter<N, S, M>,
    clock: C,
    rewards: Option<RewardPool>,
}

impl<C, N, S, M> StreamService<C, N, S, M>
where
    C: Clock,
    N: NativeBackend,
    S: SingleAssetBackend,
    M: MultiAssetBackend,
{
    pub fn new(
        ledger: StreamLedger,
        router: SettlementRouter<N, S, M>,
        clock: C,
        rewards: Option<RewardPool>,
    ) -> Self {
        Self {
            ledger,
            router,
            clock,
            rewards,
        }
    }

    /// Assemble a service from configuration and host-provided backends.
    pub fn from_config(
        config: &NodeConfig,
        clock: C,
        native: N,
        single: S,
        multi: M,
    ) -> Result<Self, NodeError> {
        let custody = config.resolve_custody()?;
        let rewards = config.resolve_rewards()?;
        Ok(Self::new(
            StreamLedger::with_counter(config.initial_stream_id),
            SettlementRouter::new(custody, native, single, multi),
            clock,
            rewards,
        ))
    }

    pub fn ledger(&self) -> &StreamLedger {
        &self.ledger
    }

    pub fn router_mut(&mut self) -> &mut SettlementRouter<N, S, M> {
        &mut self.router
    }

    pub fn rewards(&self) -> Option<&RewardPool> {
        self.rewards.as_ref()
    }

    /// The service's time source. Deterministic clocks mutate through
    /// interior mutability, so a shared borrow is enough to drive tests.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn create_stream(
        &mut self,
        ctx: &CallContext,
        params: CreateStreamParams,
    ) -> Result<StreamId, NodeError> {
        let now = self.clock.now();
        let id = self
            .ledger
            .create_stream(ctx, now, params, &mut self.router)?;
        if let Some(stream) = self.ledger.get_stream(id) {
            tracing::info!(
                stream_id = id,
                sender = %stream.sender,
                receiver = %stream.receiver,
                deposit = %stream.deposit,
                asset = %stream.asset,
                "stream created"
            );
        }
        Ok(id)
    }

    pub fn withdraw(
        &mut self,
        ctx: &CallContext,
        stream_id: StreamId,
        amount: TokenAmount,
    ) -> Result<WithdrawOutcome, NodeError> {
        let now = self.clock.now();
        let outcome = self
            .ledger
            .withdraw(ctx, now, stream_id, amount, &mut self.router)?;
        tracing::info!(
            stream_id,
            amount = %outcome.amount,
            drained = outcome.drained,
            "withdrawal settled"
        );
        if outcome.drained && outcome.asset.is_native() {
            if let Some(pool) = self.rewards.as_mut() {
                let skimmed = pool.on_native_drain();
                if !skimmed.is_zero() {
                    tracing::debug!(stream_id, skimmed = %skimmed, "reward skim recorded");
                }
            }
        }
        Ok(outcome)
    }

    pub fn cancel_stream(
        &mut self,
        ctx: &CallContext,
        stream_id: StreamId,
    ) -> Result<CancelOutcome, NodeError> {
        let now = self.clock.now();
        let outcome = self
            .ledger
            .cancel_stream(ctx, now, stream_id, &mut self.router)?;
        tracing::info!(
            stream_id,
            sender_share = %outcome.sender_share,
            receiver_share = %outcome.receiver_share,
            "stream cancelled"
        );
        Ok(outcome)
    }

    /// Accept native coins sent to the contract outside any stream.
    pub fn receive_native(&mut self, amount: TokenAmount) -> Result<(), NodeError> {
        self.router.receive_native(amount)?;
        if let Some(pool) = self.rewards.as_mut() {
            pool.receive(amount);
        }
        tracing::debug!(amount = %amount, "incidental native inflow");
        Ok(())
    }

    /// Admin top-up of the reward pot; the coins arrive attached.
    pub fn deposit_rewards(&mut self, ctx: &CallContext) -> Result<(), NodeError> {
        let pool = self.rewards.as_mut().ok_or(NodeError::RewardsDisabled)?;
        pool.deposit(&ctx.caller, ctx.attached)?;
        if let Err(err) = self.router.receive_native(ctx.attached) {
            if let Some(pool) = self.rewards.as_mut() {
                let _ = pool.withdraw(&ctx.caller, ctx.attached);
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Admin claim from the reward pot, settled in native coin.
    pub fn withdraw_rewards(
        &mut self,
        ctx: &CallContext,
        amount: TokenAmount,
    ) -> Result<(), NodeError> {
        let pool = self.rewards.as_mut().ok_or(NodeError::RewardsDisabled)?;
        pool.withdraw(&ctx.caller, amount)?;
        if let Err(err) = self
            .router
            .payout(&AssetRef::Native, &ctx.caller, amount)
        {
            if let Some(pool) = self.rewards.as_mut() {
                pool.credit_claimable(amount);
            }
            return Err(err.into());
        }
        tracing::info!(amount = %amount, "rewards withdrawn");
        Ok(())
    }

    /// What `who` could claim from a stream right now.
    pub fn balance_of(
        &self,
        stream_id: StreamId,
        who: &Address,
    ) -> Result<TokenAmount, NodeError> {
        let now = self.clock.now();
        Ok(self.ledger.balance_of(stream_id, who, now)?)
    }

    /// Capture the ledger state at the current time.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot(self.clock.now())
    }

    /// Snapshot as JSON, for host inspection endpoints.
    pub fn snapshot_json(&self) -> Result<String, NodeError> {
        serde_json::to_string(&self.snapshot()).map_err(|e| NodeError::Serialization(e.to_string()))
    }
}

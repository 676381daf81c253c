//! The stream ledger engine.

use std::collections::HashMap;

use rill_accrual as accrual;
use rill_settlement::{MultiAssetBackend, NativeBackend, SettlementRouter, SingleAssetBackend};
use rill_types::{Address, AssetRef, Stream, StreamId, Timestamp, TokenAmount};

use crate::context::CallContext;
use crate::error::LedgerError;

/// Caller-supplied parameters for stream creation. The deposit is derived,
/// never passed in.
#[derive(Clone, Debug)]
pub struct CreateStreamParams {
    pub rate_per_second: TokenAmount,
    pub start_time: Timestamp,
    pub stop_time: Timestamp,
    pub receiver: Address,
    pub asset: AssetRef,
}

/// What a successful withdrawal did, for the host to observe.
#[derive(Clone, Debug)]
pub struct WithdrawOutcome {
    pub stream_id: StreamId,
    pub amount: TokenAmount,
    pub asset: AssetRef,
    /// The withdrawal emptied the stream and removed it from the ledger.
    pub drained: bool,
}

/// What a successful cancellation settled to each party.
#[derive(Clone, Debug)]
pub struct CancelOutcome {
    pub stream_id: StreamId,
    pub asset: AssetRef,
    pub sender_share: TokenAmount,
    pub receiver_share: TokenAmount,
}

/// The stream ledger: id counter plus the map of live streams.
///
/// State is explicit and owned; operations take the ambient context and the
/// settlement router as arguments. The id counter only ever moves forward,
/// including across deletions.
pub struct StreamLedger {
    next_stream_id: StreamId,
    streams: HashMap<StreamId, Stream>,
}

impl StreamLedger {
    pub fn new() -> Self {
        Self::with_counter(0)
    }

    /// Start the id counter at an explicit value (restores, migrations).
    pub fn with_counter(next_stream_id: StreamId) -> Self {
        Self {
            next_stream_id,
            streams: HashMap::new(),
        }
    }

    /// Create a stream, pulling the deposit into custody.
    ///
    /// The custody pull happens before insertion: a failed pull leaves the
    /// ledger untouched, and a successful pull is immediately followed by
    /// the insertion within the same operation.
    pub fn create_stream<N, S, M>(
        &mut self,
        ctx: &CallContext,
        now: Timestamp,
        params: CreateStreamParams,
        router: &mut SettlementRouter<N, S, M>,
    ) -> Result<StreamId, LedgerError>
    where
        N: NativeBackend,
        S: SingleAssetBackend,
        M: MultiAssetBackend,
    {
        if params.start_time <= now {
            return Err(LedgerError::StartTimeInPast {
                start: params.start_time.as_secs(),
                now: now.as_secs(),
            });
        }
        if params.stop_time <= params.start_time {
            return Err(LedgerError::InvalidDuration {
                start: params.start_time.as_secs(),
                stop: params.stop_time.as_secs(),
            });
        }
        if params.receiver == ctx.caller {
            return Err(LedgerError::SelfStream);
        }
        if params.rate_per_second.is_zero() {
            return Err(LedgerError::ZeroRate);
        }

        let deposit =
            accrual::deposit_for(params.rate_per_second, params.start_time, params.stop_time)?;

        let id = self.next_stream_id;
        let next = id.checked_add(1).ok_or(LedgerError::CounterExhausted)?;

        router.pull(&params.asset, &ctx.caller, ctx.attached, deposit)?;

        self.streams.insert(
            id,
            Stream {
                deposit,
                rate_per_second: params.rate_per_second,
                remaining_balance: deposit,
                start_time: params.start_time,
                stop_time: params.stop_time,
                receiver: params.receiver,
                sender: ctx.caller.clone(),
                asset: params.asset,
            },
        );
        self.next_stream_id = next;
        Ok(id)
    }

    /// Withdraw accrued funds to the stream's receiver.
    ///
    /// The balance deduction is committed to the map before the payout call
    /// runs, so re-entry observes the reduced balance; a payout failure
    /// restores the original record.
    pub fn withdraw<N, S, M>(
        &mut self,
        ctx: &CallContext,
        now: Timestamp,
        stream_id: StreamId,
        amount: TokenAmount,
        router: &mut SettlementRouter<N, S, M>,
    ) -> Result<WithdrawOutcome, LedgerError>
    where
        N: NativeBackend,
        S: SingleAssetBackend,
        M: MultiAssetBackend,
    {
        let stream = self
            .streams
            .get(&stream_id)
            .ok_or(LedgerError::StreamNotFound(stream_id))?;

        if ctx.caller != stream.receiver {
            return Err(LedgerError::NotReceiver { stream_id });
        }
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        if accrual::elapsed_time(stream, now) == 0 {
            return Err(LedgerError::ZeroAccrual { stream_id });
        }
        let available = accrual::receiver_entitlement(stream, now)?;
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount.raw(),
                available: available.raw(),
            });
        }

        let original = stream.clone();
        let new_balance = original
            .remaining_balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceUnderflow { stream_id })?;
        let drained = new_balance.is_zero();

        if drained {
            self.streams.remove(&stream_id);
        } else if let Some(entry) = self.streams.get_mut(&stream_id) {
            entry.remaining_balance = new_balance;
        }

        let asset = original.asset.clone();
        if let Err(err) = router.payout(&asset, &original.receiver, amount) {
            self.streams.insert(stream_id, original);
            return Err(err.into());
        }

        Ok(WithdrawOutcome {
            stream_id,
            amount,
            asset,
            drained,
        })
    }

    /// Cancel a stream, splitting the remaining balance pro rata.
    ///
    /// The receiver gets what has accrued and was not yet withdrawn; the
    /// sender gets the rest. The two shares always sum exactly to the
    /// remaining balance. The stream is removed before the payout legs run
    /// and restored if settlement fails.
    pub fn cancel_stream<N, S, M>(
        &mut self,
        ctx: &CallContext,
        now: Timestamp,
        stream_id: StreamId,
        router: &mut SettlementRouter<N, S, M>,
    ) -> Result<CancelOutcome, LedgerError>
    where
        N: NativeBackend,
        S: SingleAssetBackend,
        M: MultiAssetBackend,
    {
        let stream = self
            .streams
            .get(&stream_id)
            .ok_or(LedgerError::StreamNotFound(stream_id))?;

        if !stream.is_party(&ctx.caller) {
            return Err(LedgerError::NotParticipant { stream_id });
        }

        let receiver_share = accrual::receiver_entitlement(stream, now)?;
        let sender_share = stream
            .remaining_balance
            .checked_sub(receiver_share)
            .ok_or(LedgerError::BalanceUnderflow { stream_id })?;

        let original = self
            .streams
            .remove(&stream_id)
            .ok_or(LedgerError::StreamNotFound(stream_id))?;
        let asset = original.asset.clone();

        if let Err(err) = router.payout_pair(
            &asset,
            (&original.sender, sender_share),
            (&original.receiver, receiver_share),
        ) {
            self.streams.insert(stream_id, original);
            return Err(err.into());
        }

        Ok(CancelOutcome {
            stream_id,
            asset,
            sender_share,
            receiver_share,
        })
    }

    /// Look up a live stream.
    pub fn get_stream(&self, stream_id: StreamId) -> Option<&Stream> {
        self.streams.get(&stream_id)
    }

    pub fn contains(&self, stream_id: StreamId) -> bool {
        self.streams.contains_key(&stream_id)
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// The id the next created stream will take.
    pub fn next_stream_id(&self) -> StreamId {
        self.next_stream_id
    }

    pub(crate) fn streams(&self) -> &HashMap<StreamId, Stream> {
        &self.streams
    }

    pub(crate) fn insert_raw(&mut self, stream_id: StreamId, stream: Stream) {
        self.streams.insert(stream_id, stream);
    }

    /// What `who` could claim from the stream right now: the accrued
    /// entitlement for the receiver, the refund share for the sender, zero
    /// for anyone else.
    pub fn balance_of(
        &self,
        stream_id: StreamId,
        who: &Address,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        let stream = self
            .streams
            .get(&stream_id)
            .ok_or(LedgerError::StreamNotFound(stream_id))?;
        if *who == stream.receiver {
            Ok(accrual::receiver_entitlement(stream, now)?)
        } else if *who == stream.sender {
            Ok(accrual::sender_entitlement(stream, now)?)
        } else {
            Ok(TokenAmount::ZERO)
        }
    }
}

impl Default for StreamLedger {
    fn default() -> Self {
        Self::new()
    }
}

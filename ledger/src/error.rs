use rill_types::StreamId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("stream {0} not found")]
    StreamNotFound(StreamId),

    #[error("start time {start}s must be greater than the current time {now}s")]
    StartTimeInPast { start: u64, now: u64 },

    #[error("stop time {stop}s must be greater than start time {start}s")]
    InvalidDuration { start: u64, stop: u64 },

    #[error("receiver must differ from the stream's sender")]
    SelfStream,

    #[error("rate per second must be positive")]
    ZeroRate,

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("caller is not the receiver of stream {stream_id}")]
    NotReceiver { stream_id: StreamId },

    #[error("caller is neither sender nor receiver of stream {stream_id}")]
    NotParticipant { stream_id: StreamId },

    #[error("nothing has accrued on stream {stream_id} yet")]
    ZeroAccrual { stream_id: StreamId },

    #[error("insufficient accrued balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    /// A deduction would push `remaining_balance` below zero. Unreachable
    /// while the entitlement bound holds.
    #[error("balance underflow on stream {stream_id}")]
    BalanceUnderflow { stream_id: StreamId },

    #[error("stream id counter exhausted")]
    CounterExhausted,

    #[error("snapshot encoding failed: {0}")]
    Snapshot(String),

    #[error("accrual error: {0}")]
    Accrual(#[from] rill_accrual::AccrualError),

    #[error("settlement error: {0}")]
    Settlement(#[from] rill_settlement::SettlementError),
}

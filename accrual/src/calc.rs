//! Entitlement and deposit arithmetic.

use crate::error::AccrualError;
use rill_types::{Stream, Timestamp, TokenAmount};

/// Seconds of the stream's window that have elapsed at `now`.
///
/// Zero before the window opens; capped at the full window once it closes.
pub fn elapsed_time(stream: &Stream, now: Timestamp) -> u64 {
    if now < stream.start_time {
        return 0;
    }
    if now < stream.stop_time {
        stream.start_time.elapsed_since(now)
    } else {
        stream.duration_secs()
    }
}

/// Size the deposit for a stream: `(stop - start) * rate_per_second`.
///
/// The window check duplicates the ledger's precondition; it is kept so the
/// function stands alone as a total definition of deposit sizing.
pub fn deposit_for(
    rate_per_second: TokenAmount,
    start_time: Timestamp,
    stop_time: Timestamp,
) -> Result<TokenAmount, AccrualError> {
    if stop_time < start_time {
        return Err(AccrualError::InvalidWindow {
            start: start_time.as_secs(),
            stop: stop_time.as_secs(),
        });
    }
    let duration = start_time.elapsed_since(stop_time);
    rate_per_second
        .checked_mul_secs(duration)
        .ok_or(AccrualError::Overflow)
}

/// Amount the receiver may additionally withdraw at `now`.
///
/// Recomputed from `(elapsed, rate, deposit, remaining_balance)` on every
/// call; never cached. Bounded above by `remaining_balance`.
pub fn receiver_entitlement(stream: &Stream, now: Timestamp) -> Result<TokenAmount, AccrualError> {
    let elapsed = elapsed_time(stream, now);
    let raw = stream
        .rate_per_second
        .checked_mul_secs(elapsed)
        .ok_or(AccrualError::Overflow)?;

    let entitled = if stream.remaining_balance < stream.deposit {
        let withdrawn = stream.withdrawn();
        raw.checked_sub(withdrawn)
            .ok_or(AccrualError::WithdrawnExceedsAccrued {
                accrued: raw.raw(),
                withdrawn: withdrawn.raw(),
            })?
    } else {
        raw
    };

    Ok(entitled.min(stream.remaining_balance))
}

/// The sender's refund share at `now`: whatever the receiver is not
/// entitled to. Used only at cancellation.
pub fn sender_entitlement(stream: &Stream, now: Timestamp) -> Result<TokenAmount, AccrualError> {
    let entitlement = receiver_entitlement(stream, now)?;
    stream
        .remaining_balance
        .checked_sub(entitlement)
        .ok_or(AccrualError::EntitlementExceedsBalance {
            entitlement: entitlement.raw(),
            remaining: stream.remaining_balance.raw(),
        })
}

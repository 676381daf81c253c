//! The stream record: a time-bounded, rate-based payment commitment.

use crate::address::Address;
use crate::amount::TokenAmount;
use crate::asset::AssetRef;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Identifier of a stream. Strictly increasing, never reused, even across
/// deletions.
pub type StreamId = u64;

/// A payment stream held by the ledger.
///
/// Field order is part of the persisted layout and must not be rearranged;
/// snapshot encoding walks the fields in declaration order.
///
/// Invariants, enforced at creation and preserved by every operation:
/// `sender != receiver`; `stop_time > start_time`;
/// `deposit == (stop_time - start_time) * rate_per_second`, immutable;
/// `remaining_balance <= deposit`, monotonically non-increasing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    /// Total amount locked at creation.
    pub deposit: TokenAmount,
    /// Accrual rate in raw units per second.
    pub rate_per_second: TokenAmount,
    /// Amount still held by the ledger for this stream.
    pub remaining_balance: TokenAmount,
    /// When accrual begins.
    pub start_time: Timestamp,
    /// When accrual stops.
    pub stop_time: Timestamp,
    /// The party entitled to accrued funds.
    pub receiver: Address,
    /// The party who funded the stream.
    pub sender: Address,
    /// Which asset the deposit is denominated in.
    pub asset: AssetRef,
}

impl Stream {
    /// The full streaming window in whole seconds.
    pub fn duration_secs(&self) -> u64 {
        self.stop_time.as_secs().saturating_sub(self.start_time.as_secs())
    }

    /// Amount already withdrawn by the receiver.
    pub fn withdrawn(&self) -> TokenAmount {
        self.deposit.saturating_sub(self.remaining_balance)
    }

    /// Whether `who` is the stream's sender or receiver.
    pub fn is_party(&self, who: &Address) -> bool {
        *who == self.sender || *who == self.receiver
    }
}

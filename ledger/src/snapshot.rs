//! Ledger snapshots: capture the full stream map at a point in time.
//!
//! A snapshot is the only persistence surface the ledger defines; how and
//! where the bytes are stored is the host's concern. Stream fields are
//! encoded in declaration order, so a snapshot taken by one deployment can
//! be restored by another byte for byte.

use serde::{Deserialize, Serialize};

use rill_types::{Stream, StreamId, Timestamp};

use crate::error::LedgerError;
use crate::ledger::StreamLedger;

/// Snapshot version for compatibility.
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// One live stream captured in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub id: StreamId,
    pub stream: Stream,
}

/// The state of the whole ledger at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    /// When the snapshot was taken.
    pub created_at: Timestamp,
    /// The counter value at capture; restoring continues the id sequence.
    pub next_stream_id: StreamId,
    /// Live streams, sorted by id for deterministic encoding.
    pub streams: Vec<StreamEntry>,
}

impl LedgerSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }
}

impl StreamLedger {
    /// Capture the current ledger state.
    pub fn snapshot(&self, now: Timestamp) -> LedgerSnapshot {
        let mut streams: Vec<StreamEntry> = self
            .streams()
            .iter()
            .map(|(id, stream)| StreamEntry {
                id: *id,
                stream: stream.clone(),
            })
            .collect();
        streams.sort_by_key(|entry| entry.id);
        LedgerSnapshot {
            version: CURRENT_SNAPSHOT_VERSION,
            created_at: now,
            next_stream_id: self.next_stream_id(),
            streams,
        }
    }

    /// Rebuild a ledger from a snapshot, continuing its id sequence.
    pub fn restore(snapshot: LedgerSnapshot) -> Self {
        let mut ledger = Self::with_counter(snapshot.next_stream_id);
        for entry in snapshot.streams {
            ledger.insert_raw(entry.id, entry.stream);
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_types::{Address, AssetRef, TokenAmount};

    fn dummy_stream(receiver: &str) -> Stream {
        Stream {
            deposit: TokenAmount::new(3000),
            rate_per_second: TokenAmount::new(10),
            remaining_balance: TokenAmount::new(2000),
            start_time: Timestamp::new(200),
            stop_time: Timestamp::new(500),
            receiver: Address::new(receiver),
            sender: Address::new("rill_alice"),
            asset: AssetRef::Native,
        }
    }

    #[test]
    fn test_snapshot_roundtrip_through_bytes() {
        let mut ledger = StreamLedger::with_counter(7);
        ledger.insert_raw(3, dummy_stream("rill_bob"));
        ledger.insert_raw(5, dummy_stream("rill_carol"));

        let snapshot = ledger.snapshot(Timestamp::new(400));
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = LedgerSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = StreamLedger::restore(decoded);
        assert_eq!(restored.next_stream_id(), 7);
        assert_eq!(restored.stream_count(), 2);
        assert_eq!(
            restored.get_stream(5).unwrap().receiver,
            Address::new("rill_carol")
        );
    }

    #[test]
    fn test_snapshot_streams_are_sorted_by_id() {
        let mut ledger = StreamLedger::with_counter(10);
        ledger.insert_raw(9, dummy_stream("rill_bob"));
        ledger.insert_raw(2, dummy_stream("rill_carol"));
        ledger.insert_raw(4, dummy_stream("rill_dave"));

        let snapshot = ledger.snapshot(Timestamp::new(400));
        let ids: Vec<_> = snapshot.streams.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 9]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = LedgerSnapshot::from_bytes(&[0xff, 0x01]);
        assert!(matches!(result.unwrap_err(), LedgerError::Snapshot(_)));
    }
}

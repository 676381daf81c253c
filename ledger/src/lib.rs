//! The stream ledger.
//!
//! One map from stream id to stream record, one strictly increasing id
//! counter, three operations: create, withdraw, cancel. Terminal states
//! (drained, cancelled) are represented by removal from the map.
//!
//! Every operation either fully succeeds or leaves the map unchanged.
//! Local state is mutated before any external transfer call is issued, and
//! the staged mutation is rolled back if the call fails.

pub mod context;
pub mod error;
pub mod ledger;
pub mod snapshot;

pub use context::CallContext;
pub use error::LedgerError;
pub use ledger::{CancelOutcome, CreateStreamParams, StreamLedger, WithdrawOutcome};
pub use snapshot::{LedgerSnapshot, StreamEntry, CURRENT_SNAPSHOT_VERSION};

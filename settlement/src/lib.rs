//! Settlement: moving stream funds between parties and ledger custody.
//!
//! The router dispatches a transfer request to one of three backends based
//! on the asset's tag. Backends for token assets call out to externally
//! controlled contracts; the router itself only tracks the native custody
//! balance and enforces the funding rules at stream creation.

pub mod backend;
pub mod error;
pub mod router;

pub use backend::{MultiAssetBackend, NativeBackend, SingleAssetBackend};
pub use error::SettlementError;
pub use router::SettlementRouter;

//! Host integration for the rill stream ledger.
//!
//! The engine crates are pure and log-free; this crate supplies what the
//! host environment provides on chain: a clock, call contexts, structured
//! logging, configuration, and the peripheral reward pool.

pub mod clock;
pub mod config;
pub mod error;
pub mod rewards;
pub mod service;
pub mod telemetry;

pub use clock::SystemClock;
pub use config::{LogFormat, NodeConfig, RewardsSection};
pub use error::NodeError;
pub use rewards::RewardPool;
pub use service::StreamService;
pub use telemetry::init_tracing;

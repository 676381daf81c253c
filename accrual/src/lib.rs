//! Accrual calculator for payment streams.
//!
//! Entitlement is a deterministic function of time, not cached state:
//! `entitled(s) = elapsed(s, now) * rate - already_withdrawn(s)`
//!
//! Everything here is pure and side-effect free. Recomputing on every call
//! trades one multiplication for the absence of reconciliation between
//! stored and derived balances.

pub mod calc;
pub mod error;

pub use calc::{deposit_for, elapsed_time, receiver_entitlement, sender_entitlement};
pub use error::AccrualError;

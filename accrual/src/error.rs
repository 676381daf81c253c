//! Accrual-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccrualError {
    #[error("arithmetic overflow in accrual computation")]
    Overflow,

    #[error("stop time {stop}s precedes start time {start}s")]
    InvalidWindow { start: u64, stop: u64 },

    /// More has been withdrawn than has accrued. Unreachable while the
    /// ledger's entitlement bound holds; surfaced instead of wrapping.
    #[error("withdrawn {withdrawn} exceeds accrued {accrued}")]
    WithdrawnExceedsAccrued { accrued: u128, withdrawn: u128 },

    /// The receiver's entitlement exceeds the remaining balance. Unreachable
    /// while `remaining_balance <= deposit` holds; surfaced instead of wrapping.
    #[error("entitlement {entitlement} exceeds remaining balance {remaining}")]
    EntitlementExceedsBalance { entitlement: u128, remaining: u128 },
}

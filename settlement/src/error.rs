use rill_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("attached {attached} does not match the required deposit {required}")]
    AmountMismatch { attached: u128, required: u128 },

    #[error("native funds attached to a token-funded call")]
    UnexpectedAttachedFunds,

    /// Custody held less than a payout requested. Unreachable while the
    /// ledger's balance invariants hold.
    #[error("custody underflow: requested {requested}, custodied {custodied}")]
    CustodyUnderflow { requested: u128, custodied: u128 },

    #[error("custody balance overflow")]
    CustodyOverflow,

    #[error("token contract {contract} rejected the transfer: {reason}")]
    TokenContract { contract: Address, reason: String },
}

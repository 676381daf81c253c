//! Ambient call context, made explicit.

use rill_types::{Address, TokenAmount};

/// Who is calling, and what native funds arrived attached to the call.
///
/// Constructed by the host; the ledger trusts both fields as unforgeable.
#[derive(Clone, Debug)]
pub struct CallContext {
    pub caller: Address,
    pub attached: TokenAmount,
}

impl CallContext {
    pub fn new(caller: Address, attached: TokenAmount) -> Self {
        Self { caller, attached }
    }

    /// A call with no attached funds.
    pub fn from_caller(caller: Address) -> Self {
        Self::new(caller, TokenAmount::ZERO)
    }
}

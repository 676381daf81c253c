//! Nullable native-coin backend.

use rill_settlement::{NativeBackend, SettlementError};
use rill_types::{Address, TokenAmount};
use std::collections::HashMap;

/// Records native credits per address. The router has already debited
/// custody by the time `send` runs, so the double never fails.
#[derive(Default)]
pub struct NullNativeBackend {
    credits: HashMap<Address, TokenAmount>,
}

impl NullNativeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total native units credited to `who` so far.
    pub fn credited(&self, who: &Address) -> TokenAmount {
        self.credits.get(who).copied().unwrap_or(TokenAmount::ZERO)
    }
}

impl NativeBackend for NullNativeBackend {
    fn send(&mut self, to: &Address, amount: TokenAmount) -> Result<(), SettlementError> {
        let entry = self.credits.entry(to.clone()).or_insert(TokenAmount::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or(SettlementError::CustodyOverflow)?;
        Ok(())
    }
}

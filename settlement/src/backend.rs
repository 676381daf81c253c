//! Transfer backend traits.
//!
//! Each trait is the seam to one kind of asset in the host environment.
//! The contract for every method: it either fully succeeds (balances
//! updated) or returns an error having had no effect. An error aborts the
//! enclosing ledger operation; the host's transaction boundary is expected
//! to unwind any external effects of earlier calls in the same operation.

use crate::error::SettlementError;
use rill_types::{Address, AssetId, TokenAmount};

/// The chain's base currency. Custody debiting is tracked by the router;
/// this backend only credits the recipient.
pub trait NativeBackend {
    fn send(&mut self, to: &Address, amount: TokenAmount) -> Result<(), SettlementError>;
}

/// An external single-balance fungible token contract.
pub trait SingleAssetBackend {
    fn transfer(
        &mut self,
        contract: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), SettlementError>;
}

/// An external multi-asset token contract. The host-side entry point is a
/// batched transfer; the router only ever issues single-item batches.
pub trait MultiAssetBackend {
    fn transfer(
        &mut self,
        contract: &Address,
        from: &Address,
        to: &Address,
        asset_id: AssetId,
        amount: TokenAmount,
    ) -> Result<(), SettlementError>;
}

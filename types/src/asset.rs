//! Asset references: which fungible asset a stream pays out in.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one asset inside a multi-asset token contract.
pub type AssetId = u64;

/// A reference to a fungible asset, tagged by transfer backend.
///
/// The set is closed: the settlement router dispatches on it with an
/// exhaustive match, so adding a variant is a breaking change by design of
/// the type system, not by convention.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRef {
    /// The chain's base currency. Funding travels attached to the call.
    Native,
    /// A single-balance fungible token contract.
    SingleAssetToken { contract: Address },
    /// One asset inside a multi-asset token contract.
    MultiAssetToken { contract: Address, asset_id: AssetId },
}

impl AssetRef {
    pub fn is_native(&self) -> bool {
        matches!(self, AssetRef::Native)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRef::Native => write!(f, "native"),
            AssetRef::SingleAssetToken { contract } => write!(f, "token:{contract}"),
            AssetRef::MultiAssetToken { contract, asset_id } => {
                write!(f, "token:{contract}#{asset_id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_native() {
        assert!(AssetRef::Native.is_native());
        let token = AssetRef::SingleAssetToken {
            contract: Address::new("rill_token"),
        };
        assert!(!token.is_native());
    }

    #[test]
    fn test_display_includes_asset_id() {
        let asset = AssetRef::MultiAssetToken {
            contract: Address::new("rill_multi"),
            asset_id: 7,
        };
        assert_eq!(format!("{asset}"), "token:rill_multi#7");
    }
}

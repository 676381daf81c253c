//! Wallet and contract address type with `rill_` prefix.

use crate::error::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An on-ledger address, always prefixed with `rill_`.
///
/// The same type names wallets and token contracts: the settlement backends
/// only care that an address identifies a balance holder in the host
/// environment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all rill addresses.
    pub const PREFIX: &'static str = "rill_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `rill_`.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::parse(raw).expect("address must start with rill_")
    }

    /// Fallible constructor, used when the input comes from configuration
    /// or other untrusted text.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let s = raw.into();
        if !s.starts_with(Self::PREFIX) {
            return Err(AddressError::BadPrefix(s));
        }
        if s.len() == Self::PREFIX.len() {
            return Err(AddressError::Empty);
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; denominations are a presentation concern.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount of some fungible asset, in raw units.
///
/// The same type is used for deposits, balances, and per-second rates: a
/// rate is just an amount that accrues once per elapsed second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Multiply a per-second rate by an elapsed duration in whole seconds.
    pub fn checked_mul_secs(self, secs: u64) -> Option<Self> {
        self.0.checked_mul(secs as u128).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sub_underflow_is_none() {
        let a = TokenAmount::new(5);
        let b = TokenAmount::new(10);
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(b.checked_sub(a), Some(TokenAmount::new(5)));
    }

    #[test]
    fn test_checked_mul_secs() {
        let rate = TokenAmount::new(10);
        assert_eq!(rate.checked_mul_secs(300), Some(TokenAmount::new(3000)));
        assert_eq!(TokenAmount::new(u128::MAX).checked_mul_secs(2), None);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let a = TokenAmount::new(5);
        let b = TokenAmount::new(10);
        assert_eq!(a.saturating_sub(b), TokenAmount::ZERO);
    }

    #[test]
    fn test_zero_and_ordering() {
        assert!(TokenAmount::ZERO.is_zero());
        assert!(TokenAmount::new(1) > TokenAmount::ZERO);
        assert_eq!(TokenAmount::new(3).min(TokenAmount::new(7)), TokenAmount::new(3));
    }
}

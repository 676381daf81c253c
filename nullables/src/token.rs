//! Nullable token contracts.
//!
//! Each double simulates the universe of external token contracts of its
//! kind: balances are keyed by contract address so one instance can stand
//! in for any number of deployed contracts. Failures can be programmed to
//! exercise abort-and-rollback paths.

use rill_settlement::{MultiAssetBackend, SettlementError, SingleAssetBackend};
use rill_types::{Address, AssetId, TokenAmount};
use std::collections::HashMap;

/// In-memory single-balance fungible token contracts.
#[derive(Default)]
pub struct NullSingleAssetToken {
    balances: HashMap<(Address, Address), TokenAmount>,
    fail_reason: Option<String>,
}

impl NullSingleAssetToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, contract: &Address, holder: &Address, amount: TokenAmount) {
        let entry = self
            .balances
            .entry((contract.clone(), holder.clone()))
            .or_insert(TokenAmount::ZERO);
        *entry = entry.checked_add(amount).unwrap_or(*entry);
    }

    pub fn balance_of(&self, contract: &Address, holder: &Address) -> TokenAmount {
        self.balances
            .get(&(contract.clone(), holder.clone()))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Make every subsequent transfer fail with `reason`.
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.fail_reason = Some(reason.into());
    }

    pub fn clear_failure(&mut self) {
        self.fail_reason = None;
    }
}

impl SingleAssetBackend for NullSingleAssetToken {
    fn transfer(
        &mut self,
        contract: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), SettlementError> {
        if let Some(reason) = &self.fail_reason {
            return Err(SettlementError::TokenContract {
                contract: contract.clone(),
                reason: reason.clone(),
            });
        }
        let balance = self.balance_of(contract, from);
        let debited = balance
            .checked_sub(amount)
            .ok_or_else(|| SettlementError::TokenContract {
                contract: contract.clone(),
                reason: format!("insufficient balance: have {balance}, need {amount}"),
            })?;
        self.balances.insert((contract.clone(), from.clone()), debited);
        let entry = self
            .balances
            .entry((contract.clone(), to.clone()))
            .or_insert(TokenAmount::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| SettlementError::TokenContract {
                contract: contract.clone(),
                reason: "balance overflow".into(),
            })?;
        Ok(())
    }
}

/// In-memory multi-asset token contracts.
#[derive(Default)]
pub struct NullMultiAssetToken {
    balances: HashMap<(Address, AssetId, Address), TokenAmount>,
    fail_reason: Option<String>,
}

impl NullMultiAssetToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(
        &mut self,
        contract: &Address,
        asset_id: AssetId,
        holder: &Address,
        amount: TokenAmount,
    ) {
        let entry = self
            .balances
            .entry((contract.clone(), asset_id, holder.clone()))
            .or_insert(TokenAmount::ZERO);
        *entry = entry.checked_add(amount).unwrap_or(*entry);
    }

    pub fn balance_of(
        &self,
        contract: &Address,
        asset_id: AssetId,
        holder: &Address,
    ) -> TokenAmount {
        self.balances
            .get(&(contract.clone(), asset_id, holder.clone()))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Make every subsequent transfer fail with `reason`.
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.fail_reason = Some(reason.into());
    }

    pub fn clear_failure(&mut self) {
        self.fail_reason = None;
    }
}

impl MultiAssetBackend for NullMultiAssetToken {
    fn transfer(
        &mut self,
        contract: &Address,
        from: &Address,
        to: &Address,
        asset_id: AssetId,
        amount: TokenAmount,
    ) -> Result<(), SettlementError> {
        if let Some(reason) = &self.fail_reason {
            return Err(SettlementError::TokenContract {
                contract: contract.clone(),
                reason: reason.clone(),
            });
        }
        let balance = self.balance_of(contract, asset_id, from);
        let debited = balance
            .checked_sub(amount)
            .ok_or_else(|| SettlementError::TokenContract {
                contract: contract.clone(),
                reason: format!(
                    "insufficient balance of asset {asset_id}: have {balance}, need {amount}"
                ),
            })?;
        self.balances
            .insert((contract.clone(), asset_id, from.clone()), debited);
        let entry = self
            .balances
            .entry((contract.clone(), asset_id, to.clone()))
            .or_insert(TokenAmount::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| SettlementError::TokenContract {
                contract: contract.clone(),
                reason: "balance overflow".into(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Address {
        Address::new("rill_token")
    }

    #[test]
    fn test_single_asset_transfer_moves_balance() {
        let mut backend = NullSingleAssetToken::new();
        let alice = Address::new("rill_alice");
        let bob = Address::new("rill_bob");
        backend.mint(&token(), &alice, TokenAmount::new(100));

        backend
            .transfer(&token(), &alice, &bob, TokenAmount::new(40))
            .unwrap();
        assert_eq!(backend.balance_of(&token(), &alice), TokenAmount::new(60));
        assert_eq!(backend.balance_of(&token(), &bob), TokenAmount::new(40));
    }

    #[test]
    fn test_single_asset_insufficient_balance() {
        let mut backend = NullSingleAssetToken::new();
        let alice = Address::new("rill_alice");
        let bob = Address::new("rill_bob");

        let result = backend.transfer(&token(), &alice, &bob, TokenAmount::new(1));
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::TokenContract { .. }
        ));
    }

    #[test]
    fn test_programmed_failure_and_recovery() {
        let mut backend = NullSingleAssetToken::new();
        let alice = Address::new("rill_alice");
        let bob = Address::new("rill_bob");
        backend.mint(&token(), &alice, TokenAmount::new(100));

        backend.fail_with("paused");
        assert!(backend
            .transfer(&token(), &alice, &bob, TokenAmount::new(1))
            .is_err());
        // A programmed failure has no side effects.
        assert_eq!(backend.balance_of(&token(), &alice), TokenAmount::new(100));

        backend.clear_failure();
        assert!(backend
            .transfer(&token(), &alice, &bob, TokenAmount::new(1))
            .is_ok());
    }

    #[test]
    fn test_multi_asset_balances_are_per_asset() {
        let mut backend = NullMultiAssetToken::new();
        let alice = Address::new("rill_alice");
        backend.mint(&token(), 1, &alice, TokenAmount::new(10));
        backend.mint(&token(), 2, &alice, TokenAmount::new(20));

        assert_eq!(backend.balance_of(&token(), 1, &alice), TokenAmount::new(10));
        assert_eq!(backend.balance_of(&token(), 2, &alice), TokenAmount::new(20));
        assert_eq!(backend.balance_of(&token(), 3, &alice), TokenAmount::ZERO);
    }
}

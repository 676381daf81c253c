//! Dispatch of transfer requests to the asset-specific backends.

use crate::backend::{MultiAssetBackend, NativeBackend, SingleAssetBackend};
use crate::error::SettlementError;
use rill_types::{Address, AssetRef, TokenAmount};

/// Routes custody inflow and payout requests to one of three backends.
///
/// Zero-amount payouts are skipped uniformly across all backends; no
/// backend ever sees a zero-value transfer.
pub struct SettlementRouter<N, S, M> {
    /// The ledger's own address, used as the counterparty in token calls.
    custody: Address,
    /// Native units currently held in custody (stream deposits plus
    /// incidental inflow).
    native_custodied: TokenAmount,
    native: N,
    single: S,
    multi: M,
}

impl<N, S, M> SettlementRouter<N, S, M>
where
    N: NativeBackend,
    S: SingleAssetBackend,
    M: MultiAssetBackend,
{
    pub fn new(custody: Address, native: N, single: S, multi: M) -> Self {
        Self {
            custody,
            native_custodied: TokenAmount::ZERO,
            native,
            single,
            multi,
        }
    }

    /// The ledger's custody address.
    pub fn custody(&self) -> &Address {
        &self.custody
    }

    /// Native units currently held in custody.
    pub fn custodied(&self) -> TokenAmount {
        self.native_custodied
    }

    /// Host access to the owned backends, mostly for inspection and setup.
    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    pub fn single_mut(&mut self) -> &mut S {
        &mut self.single
    }

    pub fn multi_mut(&mut self) -> &mut M {
        &mut self.multi
    }

    /// Accept incidental native inflow that belongs to no stream (the
    /// implicit "receive funds" entry point).
    pub fn receive_native(&mut self, amount: TokenAmount) -> Result<(), SettlementError> {
        self.native_custodied = self
            .native_custodied
            .checked_add(amount)
            .ok_or(SettlementError::CustodyOverflow)?;
        Ok(())
    }

    /// Pull `amount` of `asset` from `payer` into custody at stream creation.
    ///
    /// Native funding must arrive attached to the call and must match the
    /// deposit exactly; token funding must attach nothing and is pulled by
    /// invoking the external contract with `from = payer, to = custody`.
    pub fn pull(
        &mut self,
        asset: &AssetRef,
        payer: &Address,
        attached: TokenAmount,
        amount: TokenAmount,
    ) -> Result<(), SettlementError> {
        match asset {
            AssetRef::Native => {
                if attached != amount {
                    return Err(SettlementError::AmountMismatch {
                        attached: attached.raw(),
                        required: amount.raw(),
                    });
                }
                self.receive_native(amount)
            }
            AssetRef::SingleAssetToken { contract } => {
                if !attached.is_zero() {
                    return Err(SettlementError::UnexpectedAttachedFunds);
                }
                self.single.transfer(contract, payer, &self.custody, amount)
            }
            AssetRef::MultiAssetToken { contract, asset_id } => {
                if !attached.is_zero() {
                    return Err(SettlementError::UnexpectedAttachedFunds);
                }
                self.multi
                    .transfer(contract, payer, &self.custody, *asset_id, amount)
            }
        }
    }

    /// Pay `amount` of `asset` out of custody to `to`.
    pub fn payout(
        &mut self,
        asset: &AssetRef,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), SettlementError> {
        if amount.is_zero() {
            return Ok(());
        }
        match asset {
            AssetRef::Native => {
                let remaining = self.native_custodied.checked_sub(amount).ok_or(
                    SettlementError::CustodyUnderflow {
                        requested: amount.raw(),
                        custodied: self.native_custodied.raw(),
                    },
                )?;
                self.native.send(to, amount)?;
                self.native_custodied = remaining;
                Ok(())
            }
            AssetRef::SingleAssetToken { contract } => {
                self.single.transfer(contract, &self.custody, to, amount)
            }
            AssetRef::MultiAssetToken { contract, asset_id } => {
                self.multi
                    .transfer(contract, &self.custody, to, *asset_id, amount)
            }
        }
    }

    /// Pay two parties out of custody in one settlement (cancellation).
    ///
    /// For the native asset the custody debit is checked for the sum before
    /// either leg runs, so a two-leg native settlement cannot partially
    /// apply. Token legs are external calls; an error from either leg
    /// aborts the enclosing operation (see the backend contract).
    pub fn payout_pair(
        &mut self,
        asset: &AssetRef,
        first: (&Address, TokenAmount),
        second: (&Address, TokenAmount),
    ) -> Result<(), SettlementError> {
        if let AssetRef::Native = asset {
            let total = first
                .1
                .checked_add(second.1)
                .ok_or(SettlementError::CustodyOverflow)?;
            let remaining = self.native_custodied.checked_sub(total).ok_or(
                SettlementError::CustodyUnderflow {
                    requested: total.raw(),
                    custodied: self.native_custodied.raw(),
                },
            )?;
            if !first.1.is_zero() {
                self.native.send(first.0, first.1)?;
            }
            if !second.1.is_zero() {
                self.native.send(second.0, second.1)?;
            }
            self.native_custodied = remaining;
            Ok(())
        } else {
            self.payout(asset, first.0, first.1)?;
            self.payout(asset, second.0, second.1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_types::AssetId;

    #[derive(Default)]
    struct RecordingNative {
        sent: Vec<(Address, TokenAmount)>,
    }

    impl NativeBackend for RecordingNative {
        fn send(&mut self, to: &Address, amount: TokenAmount) -> Result<(), SettlementError> {
            self.sent.push((to.clone(), amount));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSingle {
        calls: Vec<(Address, Address, Address, TokenAmount)>,
        fail: bool,
    }

    impl SingleAssetBackend for RecordingSingle {
        fn transfer(
            &mut self,
            contract: &Address,
            from: &Address,
            to: &Address,
            amount: TokenAmount,
        ) -> Result<(), SettlementError> {
            if self.fail {
                return Err(SettlementError::TokenContract {
                    contract: contract.clone(),
                    reason: "programmed failure".into(),
                });
            }
            self.calls
                .push((contract.clone(), from.clone(), to.clone(), amount));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingMulti {
        calls: Vec<(Address, Address, Address, AssetId, TokenAmount)>,
    }

    impl MultiAssetBackend for RecordingMulti {
        fn transfer(
            &mut self,
            contract: &Address,
            from: &Address,
            to: &Address,
            asset_id: AssetId,
            amount: TokenAmount,
        ) -> Result<(), SettlementError> {
            self.calls.push((
                contract.clone(),
                from.clone(),
                to.clone(),
                asset_id,
                amount,
            ));
            Ok(())
        }
    }

    fn test_router() -> SettlementRouter<RecordingNative, RecordingSingle, RecordingMulti> {
        SettlementRouter::new(
            Address::new("rill_custody"),
            RecordingNative::default(),
            RecordingSingle::default(),
            RecordingMulti::default(),
        )
    }

    #[test]
    fn test_native_pull_requires_exact_attachment() {
        let mut router = test_router();
        let payer = Address::new("rill_alice");

        let result = router.pull(
            &AssetRef::Native,
            &payer,
            TokenAmount::new(2999),
            TokenAmount::new(3000),
        );
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::AmountMismatch { attached: 2999, required: 3000 }
        ));
        assert_eq!(router.custodied(), TokenAmount::ZERO);

        router
            .pull(
                &AssetRef::Native,
                &payer,
                TokenAmount::new(3000),
                TokenAmount::new(3000),
            )
            .unwrap();
        assert_eq!(router.custodied(), TokenAmount::new(3000));
    }

    #[test]
    fn test_token_pull_rejects_attached_native_funds() {
        let mut router = test_router();
        let asset = AssetRef::SingleAssetToken {
            contract: Address::new("rill_token"),
        };
        let result = router.pull(
            &asset,
            &Address::new("rill_alice"),
            TokenAmount::new(1),
            TokenAmount::new(100),
        );
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::UnexpectedAttachedFunds
        ));
    }

    #[test]
    fn test_token_pull_invokes_contract_toward_custody() {
        let mut router = test_router();
        let contract = Address::new("rill_token");
        let payer = Address::new("rill_alice");
        router
            .pull(
                &AssetRef::SingleAssetToken {
                    contract: contract.clone(),
                },
                &payer,
                TokenAmount::ZERO,
                TokenAmount::new(100),
            )
            .unwrap();
        assert_eq!(
            router.single.calls,
            vec![(
                contract,
                payer,
                Address::new("rill_custody"),
                TokenAmount::new(100)
            )]
        );
    }

    #[test]
    fn test_native_payout_debits_custody() {
        let mut router = test_router();
        router.receive_native(TokenAmount::new(500)).unwrap();
        router
            .payout(&AssetRef::Native, &Address::new("rill_bob"), TokenAmount::new(200))
            .unwrap();
        assert_eq!(router.custodied(), TokenAmount::new(300));
        assert_eq!(
            router.native.sent,
            vec![(Address::new("rill_bob"), TokenAmount::new(200))]
        );
    }

    #[test]
    fn test_native_payout_underflow() {
        let mut router = test_router();
        router.receive_native(TokenAmount::new(100)).unwrap();
        let result = router.payout(
            &AssetRef::Native,
            &Address::new("rill_bob"),
            TokenAmount::new(200),
        );
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::CustodyUnderflow { requested: 200, custodied: 100 }
        ));
        // Nothing was sent, nothing was debited.
        assert_eq!(router.custodied(), TokenAmount::new(100));
        assert!(router.native.sent.is_empty());
    }

    #[test]
    fn test_zero_payout_is_skipped_on_every_backend() {
        let mut router = test_router();
        router
            .payout(&AssetRef::Native, &Address::new("rill_bob"), TokenAmount::ZERO)
            .unwrap();
        router
            .payout(
                &AssetRef::SingleAssetToken {
                    contract: Address::new("rill_token"),
                },
                &Address::new("rill_bob"),
                TokenAmount::ZERO,
            )
            .unwrap();
        router
            .payout(
                &AssetRef::MultiAssetToken {
                    contract: Address::new("rill_multi"),
                    asset_id: 3,
                },
                &Address::new("rill_bob"),
                TokenAmount::ZERO,
            )
            .unwrap();
        assert!(router.native.sent.is_empty());
        assert!(router.single.calls.is_empty());
        assert!(router.multi.calls.is_empty());
    }

    #[test]
    fn test_native_pair_checks_total_before_either_leg() {
        let mut router = test_router();
        router.receive_native(TokenAmount::new(100)).unwrap();
        let alice = Address::new("rill_alice");
        let bob = Address::new("rill_bob");

        let result = router.payout_pair(
            &AssetRef::Native,
            (&alice, TokenAmount::new(80)),
            (&bob, TokenAmount::new(30)),
        );
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::CustodyUnderflow { requested: 110, custodied: 100 }
        ));
        assert!(router.native.sent.is_empty());

        router
            .payout_pair(
                &AssetRef::Native,
                (&alice, TokenAmount::new(70)),
                (&bob, TokenAmount::new(30)),
            )
            .unwrap();
        assert_eq!(router.custodied(), TokenAmount::ZERO);
        assert_eq!(router.native.sent.len(), 2);
    }

    #[test]
    fn test_pair_skips_zero_leg() {
        let mut router = test_router();
        router.receive_native(TokenAmount::new(100)).unwrap();
        router
            .payout_pair(
                &AssetRef::Native,
                (&Address::new("rill_alice"), TokenAmount::ZERO),
                (&Address::new("rill_bob"), TokenAmount::new(100)),
            )
            .unwrap();
        assert_eq!(router.native.sent.len(), 1);
    }

    #[test]
    fn test_token_failure_propagates() {
        let mut router = test_router();
        router.single.fail = true;
        let result = router.payout(
            &AssetRef::SingleAssetToken {
                contract: Address::new("rill_token"),
            },
            &Address::new("rill_bob"),
            TokenAmount::new(5),
        );
        assert!(matches!(
            result.unwrap_err(),
            SettlementError::TokenContract { .. }
        ));
    }
}

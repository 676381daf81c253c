//! Auxiliary reward pool.
//!
//! A peripheral feature riding alongside the ledger: incidental native
//! inflow (coins sent to the contract outside any stream) accumulates as
//! unallocated surplus, and each completed native-asset drain skims a flat
//! reward from that surplus into a pot the admin can claim. The pool is an
//! observer of withdrawal outcomes; the core withdraw path knows nothing
//! about it.

use rill_types::{Address, TokenAmount};

use crate::error::NodeError;

pub struct RewardPool {
    admin: Address,
    reward_per_drain: TokenAmount,
    /// Native units received outside any stream, not yet skimmed.
    unallocated: TokenAmount,
    /// Skimmed rewards, claimable by the admin.
    claimable: TokenAmount,
}

impl RewardPool {
    pub fn new(admin: Address, reward_per_drain: TokenAmount) -> Self {
        Self {
            admin,
            reward_per_drain,
            unallocated: TokenAmount::ZERO,
            claimable: TokenAmount::ZERO,
        }
    }

    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn unallocated(&self) -> TokenAmount {
        self.unallocated
    }

    pub fn claimable(&self) -> TokenAmount {
        self.claimable
    }

    /// Record incidental native inflow.
    pub fn receive(&mut self, amount: TokenAmount) {
        self.unallocated = self
            .unallocated
            .checked_add(amount)
            .unwrap_or(self.unallocated);
    }

    /// Observer hook: a native-asset stream was fully drained. Skims up to
    /// `reward_per_drain` from the unallocated surplus. Returns the amount
    /// actually skimmed.
    pub fn on_native_drain(&mut self) -> TokenAmount {
        let skim = self.reward_per_drain.min(self.unallocated);
        if skim.is_zero() {
            return TokenAmount::ZERO;
        }
        self.unallocated = self.unallocated.saturating_sub(skim);
        self.credit_claimable(skim);
        skim
    }

    /// Admin-gated top-up of the claimable pot.
    pub fn deposit(&mut self, caller: &Address, amount: TokenAmount) -> Result<(), NodeError> {
        self.ensure_admin(caller)?;
        self.credit_claimable(amount);
        Ok(())
    }

    /// Admin-gated claim. The caller settles the payout separately; this
    /// only debits the pot.
    pub fn withdraw(&mut self, caller: &Address, amount: TokenAmount) -> Result<(), NodeError> {
        self.ensure_admin(caller)?;
        self.claimable =
            self.claimable
                .checked_sub(amount)
                .ok_or(NodeError::RewardPoolUnderflow {
                    requested: amount.raw(),
                    claimable: self.claimable.raw(),
                })?;
        Ok(())
    }

    pub(crate) fn credit_claimable(&mut self, amount: TokenAmount) {
        self.claimable = self.claimable.checked_add(amount).unwrap_or(self.claimable);
    }

    fn ensure_admin(&self, caller: &Address) -> Result<(), NodeError> {
        if *caller != self.admin {
            return Err(NodeError::NotAdmin {
                caller: caller.clone(),
            });
        }
        Ok(())
    }
}

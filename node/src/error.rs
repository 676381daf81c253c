use rill_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("caller {caller} is not the reward pool admin")]
    NotAdmin { caller: Address },

    #[error("reward pool underflow: requested {requested}, claimable {claimable}")]
    RewardPoolUnderflow { requested: u128, claimable: u128 },

    #[error("reward pool is not configured")]
    RewardsDisabled,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] rill_ledger::LedgerError),

    #[error("settlement error: {0}")]
    Settlement(#[from] rill_settlement::SettlementError),
}

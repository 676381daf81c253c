//! Node configuration, loaded from TOML.

use serde::Deserialize;

use rill_types::{Address, StreamId, TokenAmount};

use crate::error::NodeError;
use crate::rewards::RewardPool;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogSection {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RewardsSection {
    /// The only address allowed to manage the reward pool.
    pub admin: String,
    /// Flat skim moved to the claimable pot per native drain.
    #[serde(default)]
    pub reward_per_drain: u128,
}

/// Top-level node configuration.
///
/// Addresses are kept as raw strings at parse time and validated by the
/// `resolve_*` accessors, so a typo surfaces as a config error rather than
/// a panic deep in the engine.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeConfig {
    /// The ledger's own custody address.
    pub custody: String,
    /// Starting value for the stream id counter. Zero for fresh deployments.
    #[serde(default)]
    pub initial_stream_id: StreamId,
    #[serde(default)]
    pub log: LogSection,
    pub rewards: Option<RewardsSection>,
}

impl NodeConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, NodeError> {
        toml::from_str(text).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn resolve_custody(&self) -> Result<Address, NodeError> {
        Address::parse(self.custody.clone()).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Build the reward pool, if one is configured.
    pub fn resolve_rewards(&self) -> Result<Option<RewardPool>, NodeError> {
        match &self.rewards {
            None => Ok(None),
            Some(section) => {
                let admin = Address::parse(section.admin.clone())
                    .map_err(|e| NodeError::Config(e.to_string()))?;
                Ok(Some(RewardPool::new(
                    admin,
                    TokenAmount::new(section.reward_per_drain),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = NodeConfig::from_toml(r#"custody = "rill_custody""#).unwrap();
        assert_eq!(config.resolve_custody().unwrap(), Address::new("rill_custody"));
        assert_eq!(config.initial_stream_id, 0);
        assert_eq!(config.log.format, LogFormat::Plain);
        assert!(config.resolve_rewards().unwrap().is_none());
    }

    #[test]
    fn test_full_config() {
        let text = r#"
            custody = "rill_custody"
            initial_stream_id = 42

            [log]
            format = "json"

            [rewards]
            admin = "rill_admin"
            reward_per_drain = 5
        "#;
        let config = NodeConfig::from_toml(text).unwrap();
        assert_eq!(config.initial_stream_id, 42);
        assert_eq!(config.log.format, LogFormat::Json);

        let pool = config.resolve_rewards().unwrap().unwrap();
        assert_eq!(pool.admin(), &Address::new("rill_admin"));
    }

    #[test]
    fn test_bad_custody_address_is_a_config_error() {
        let config = NodeConfig::from_toml(r#"custody = "tz1_custody""#).unwrap();
        assert!(matches!(
            config.resolve_custody().unwrap_err(),
            NodeError::Config(_)
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let result = NodeConfig::from_toml("custody = ");
        assert!(matches!(result.unwrap_err(), NodeError::Config(_)));
    }
}

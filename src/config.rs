// 7.0 config.rs: all ledger settings in one place. starting price, loss policy, audit buffer.
// 7.1 Environment presets pick sensible combinations.

use serde::{Deserialize, Serialize};

use crate::types::Price;

pub const DEFAULT_INITIAL_PRICE: u128 = 1000;

/// What a close does when the loss is larger than the account's free collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossPolicy {
    /// Floor the balance at zero and record the uncovered remainder as bad debt.
    #[default]
    Clamp,
    /// Reject the close with `InsufficientCollateralForLoss`.
    Revert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    // Reference price set at construction, must be positive
    pub initial_price: u128,
    pub loss_policy: LossPolicy,
    // Maximum number of events to retain in memory
    pub max_events: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_price: DEFAULT_INITIAL_PRICE,
            loss_policy: LossPolicy::Clamp,
            max_events: 100_000,
        }
    }
}

impl LedgerConfig {
    pub fn with_loss_policy(mut self, policy: LossPolicy) -> Self {
        self.loss_policy = policy;
        self
    }

    pub fn with_initial_price(mut self, price: u128) -> Self {
        self.initial_price = price;
        self
    }

    pub fn validate(&self) -> Result<Price, ConfigError> {
        let price = Price::new(self.initial_price).ok_or(ConfigError::InvalidInitialPrice)?;
        if self.max_events == 0 {
            return Err(ConfigError::InvalidEventBuffer {
                reason: "max_events must be at least 1".to_string(),
            });
        }
        Ok(price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn config(&self) -> LedgerConfig {
        match self {
            Environment::Development => LedgerConfig::default(),
            Environment::Testnet => LedgerConfig {
                max_events: 10_000,
                ..LedgerConfig::default()
            },
            // never let a loss silently vanish on mainnet
            Environment::Mainnet => LedgerConfig::default().with_loss_policy(LossPolicy::Revert),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Initial price must be positive")]
    InvalidInitialPrice,

    #[error("Invalid event buffer: {reason}")]
    InvalidEventBuffer { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let config = LedgerConfig::default();
        assert_eq!(config.validate().unwrap().value(), 1000);
        assert_eq!(config.loss_policy, LossPolicy::Clamp);
    }

    #[test]
    fn zero_price_rejected() {
        let config = LedgerConfig::default().with_initial_price(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidInitialPrice));
    }

    #[test]
    fn zero_event_buffer_rejected() {
        let config = LedgerConfig {
            max_events: 0,
            ..LedgerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEventBuffer { .. })));
    }

    #[test]
    fn environment_presets() {
        for env in [Environment::Development, Environment::Testnet, Environment::Mainnet] {
            assert!(env.config().validate().is_ok());
        }
        assert_eq!(Environment::Mainnet.config().loss_policy, LossPolicy::Revert);
    }
}

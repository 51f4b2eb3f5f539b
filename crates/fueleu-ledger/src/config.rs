//! Ledger configuration

use fueleu_core::RegulatoryParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Acceptance rules applied to a pool request before allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolPolicy {
    /// Smallest number of ships a pool may contain
    pub min_members: usize,
    /// Reject pools whose members sum to a net deficit
    pub require_non_negative_total: bool,
}

impl Default for PoolPolicy {
    fn default() -> Self {
        Self {
            min_members: 2,
            require_non_negative_total: true,
        }
    }
}

/// Ledger configuration.
///
/// ```toml
/// [regulatory]
/// target_intensity = 89.3368
/// energy_per_tonne = 41000.0
///
/// [pool]
/// min_members = 2
/// require_non_negative_total = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LedgerConfig {
    pub regulatory: RegulatoryParams,
    pub pool: PoolPolicy,
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    ///
    /// No path, or a path that does not exist, yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => {
                let contents = std::fs::read_to_string(p)?;
                Self::from_toml_str(&contents)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.regulatory.target_intensity.is_finite() || self.regulatory.target_intensity <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "target_intensity must be a positive number, got {}",
                self.regulatory.target_intensity
            )));
        }
        if !self.regulatory.energy_per_tonne.is_finite() || self.regulatory.energy_per_tonne <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "energy_per_tonne must be a positive number, got {}",
                self.regulatory.energy_per_tonne
            )));
        }
        if self.pool.min_members == 0 {
            return Err(ConfigError::Invalid(
                "pool.min_members must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// src/config.rs
// Node builder tuning.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Parameters for the BSP partitioner.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```
/// use rusted_bsp::config::BspConfig;
///
/// let config = BspConfig::from_json_str(r#"{ "split_cost_factor": 11 }"#).unwrap();
/// assert_eq!(config.split_cost_factor, 11);
/// assert_eq!(config.superblock_size, 256.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    /// Weight of a split against subtree imbalance when choosing partitions.
    pub split_cost_factor: i32,
    /// Side classification and vertex merge tolerance, in map units.
    pub distance_epsilon: f64,
    /// The root region is the map bounds grown by this much on every side.
    pub region_margin: f64,
    /// Superblocks are not subdivided below this edge length.
    pub superblock_size: f64,
}

impl Default for BspConfig {
    fn default() -> Self {
        BspConfig {
            split_cost_factor: 7,
            distance_epsilon: 1.0 / 128.0,
            region_margin: 64.0,
            superblock_size: 256.0,
        }
    }
}

impl BspConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BspConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split_cost_factor < 0 {
            return Err(ConfigError::Invalid {
                field: "split_cost_factor",
                reason: format!("must not be negative, got {}", self.split_cost_factor),
            });
        }
        if !(self.distance_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                field: "distance_epsilon",
                reason: format!("must be positive, got {}", self.distance_epsilon),
            });
        }
        if !(self.region_margin > 0.0) {
            return Err(ConfigError::Invalid {
                field: "region_margin",
                reason: format!("must be positive, got {}", self.region_margin),
            });
        }
        if !(self.superblock_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "superblock_size",
                reason: format!("must be positive, got {}", self.superblock_size),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BspConfig::default();
        assert_eq!(config.split_cost_factor, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BspConfig::from_json_str(r#"{ "region_margin": 128.0 }"#).unwrap();
        assert_eq!(config.region_margin, 128.0);
        assert_eq!(config.split_cost_factor, 7);
    }

    #[test]
    fn test_json_round_trip() {
        let config = BspConfig {
            split_cost_factor: 3,
            ..BspConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(BspConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            BspConfig::from_json_str(r#"{ "split_cost_factor": -1 }"#),
            Err(ConfigError::Invalid { field: "split_cost_factor", .. })
        ));
        assert!(matches!(
            BspConfig::from_json_str(r#"{ "distance_epsilon": 0.0 }"#),
            Err(ConfigError::Invalid { field: "distance_epsilon", .. })
        ));
        assert!(matches!(
            BspConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

//! Engine configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all) is a
//! valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::location::LocationOptions;
use crate::models::{HuntError, Result};
use crate::proximity::{DEFAULT_MINIMUM_ACCURACY_METERS, ProximityJudge};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fallback for hunts without a positive `scavengerHuntMinimumAccuracy`.
    pub default_minimum_accuracy_m: f64,
    pub location: LocationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_minimum_accuracy_m: DEFAULT_MINIMUM_ACCURACY_METERS,
            location: LocationConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        let options = LocationOptions::default();
        Self {
            high_accuracy: options.high_accuracy,
            timeout_ms: options.timeout.as_millis() as u64,
            maximum_age_ms: options.maximum_age.as_millis() as u64,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| {
            HuntError::Config(format!("{}: {}", path.display(), e))
        })
    }

    pub fn judge(&self) -> ProximityJudge {
        ProximityJudge::with_default_minimum_accuracy(self.default_minimum_accuracy_m)
    }

    pub fn location_options(&self) -> LocationOptions {
        LocationOptions {
            high_accuracy: self.location.high_accuracy,
            timeout: Duration::from_millis(self.location.timeout_ms),
            maximum_age: Duration::from_millis(self.location.maximum_age_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.location_options(), LocationOptions::default());
        assert_eq!(
            config.judge().effective_minimum_accuracy(None),
            DEFAULT_MINIMUM_ACCURACY_METERS
        );
    }

    #[test]
    fn test_partial_override() {
        let config =
            EngineConfig::from_json(r#"{"default_minimum_accuracy_m": 50, "location": {"timeout_ms": 2500}}"#)
                .unwrap();

        assert_eq!(config.judge().effective_minimum_accuracy(None), 50.0);
        let options = config.location_options();
        assert_eq!(options.timeout, Duration::from_millis(2500));
        assert!(options.high_accuracy);
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(EngineConfig::from_json("{\"location\": 3}").is_err());
    }
}

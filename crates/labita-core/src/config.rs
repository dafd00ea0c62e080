//! Immutable configuration shared by the validator and the calculator.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculation::SkinTypeTable;
use crate::error::ConfigError;
use crate::validation::ValidationRules;
use crate::validation::realtime::DEFAULT_DEBOUNCE;

/// Rule table, classification table and debounce delay.
///
/// Every field has a default, so a JSON document only needs to name what it
/// overrides. `LabItaConfig::default()` is the built-in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabItaConfig {
    pub rules: ValidationRules,
    pub skin_types: SkinTypeTable,
    /// Quiescence window for real-time validation.
    pub debounce_delay_ms: u64,
}

impl Default for LabItaConfig {
    fn default() -> Self {
        Self {
            rules: ValidationRules::default(),
            skin_types: SkinTypeTable::default(),
            debounce_delay_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl LabItaConfig {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Parse and check a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Read, parse and check a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded LabITA config");
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.skin_types.validate()?;
        for gap in self.skin_types.gaps() {
            tracing::debug!(
                above = gap.above,
                below = gap.below,
                "ITA interval not covered by any skin type"
            );
        }
        tracing::info!(
            skin_types = self.skin_types.types.len(),
            debounce_ms = self.debounce_delay_ms,
            "config checked"
        );
        Ok(())
    }
}

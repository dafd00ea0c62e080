//! Application configuration for the demo.

use std::path::PathBuf;

use labita_core::LabItaConfig;

/// Runtime configuration for the LabITA demo, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file overriding the built-in rule and skin type tables.
    pub core_config: Option<PathBuf>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            core_config: std::env::var_os("LABITA_CONFIG").map(PathBuf::from),
            pretty: std::env::var("LABITA_PRETTY").is_ok(),
        }
    }
}

impl AppConfig {
    pub fn load_core(&self) -> Result<LabItaConfig, labita_core::ConfigError> {
        match &self.core_config {
            Some(path) => LabItaConfig::from_path(path),
            None => Ok(LabItaConfig::default()),
        }
    }
}

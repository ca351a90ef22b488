//! # Gate Configuration
//!
//! Environment-aware configuration for the cancellation gate. Values merge in
//! order: built-in defaults, an optional TOML file, then environment
//! variables prefixed with `CANCEL_GATE_` (e.g. `CANCEL_GATE_CANCELABLE=true`).
//!
//! The loaded value is handed to the gate once at construction and is
//! immutable from then on.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors from file or environment loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration load error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Gate-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Default cancellation eligibility for actors without their own
    /// `cancelable` override.
    pub cancelable: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self { cancelable: false }
    }
}

impl GateConfig {
    /// Load configuration from the default sources.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("cancel_gate")
    }

    /// Load configuration from a named file (without extension) merged with
    /// environment variables. The file is optional.
    pub fn load_from_file(name: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("CANCEL_GATE"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_cancelable() {
        assert!(!GateConfig::default().cancelable);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GateConfig::load_from_file("definitely_absent_config").unwrap();
        assert!(!config.cancelable);
    }
}

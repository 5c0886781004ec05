//! Oracle configuration with TOML file support.
//!
//! ```toml
//! log_format = "json"
//! log_level = "info,oracle_keeper=debug"
//!
//! [params]
//! vote_period = 5
//! vote_threshold = "0.5"
//! reward_band = "0.02"
//!
//! [[params.whitelist]]
//! name = "ueth"
//! ```
//!
//! Decimal parameters are written as strings so they parse exactly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use oracle_types::{OracleError, OracleParams};
use oracle_utils::LogFormat;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Genesis parameters. Missing fields take their defaults.
    #[serde(default)]
    pub params: OracleParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl OracleConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OracleError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, OracleError> {
        let config: Self =
            toml::from_str(s).map_err(|e| OracleError::Configuration(e.to_string()))?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, OracleError> {
        toml::to_string_pretty(self).map_err(|e| OracleError::Serialization(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        oracle_utils::init_logging(self.log_format, &self.log_level)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: OracleParams::default(),
        }
    }
}

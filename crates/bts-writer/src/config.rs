//! Encoder configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::Provenance;

/// Settings that control how fields are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Mark the series as periodic so readers may loop it.
    pub periodic: bool,

    /// Tool name recorded in the description text.
    pub tool_name: String,

    /// Tool version recorded in the description text.
    pub tool_version: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            periodic: true,
            tool_name: "bts-writer".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl EncoderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("BTS_PERIODIC") {
            config.periodic = parse_bool(&val);
        }

        if let Ok(val) = std::env::var("BTS_TOOL_NAME") {
            config.tool_name = val;
        }

        if let Ok(val) = std::env::var("BTS_TOOL_VERSION") {
            config.tool_version = val;
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tool_name.trim().is_empty() {
            return Err("tool_name must not be empty".to_string());
        }

        if self.tool_version.trim().is_empty() {
            return Err("tool_version must not be empty".to_string());
        }

        Ok(())
    }

    /// Provenance stamped with the given generation time.
    pub fn provenance(&self, generated_at: DateTime<Utc>) -> Provenance {
        Provenance::new(&self.tool_name, &self.tool_version, generated_at)
    }
}

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

//! Configuration for the QueryAnswerer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the QueryAnswerer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum time for a single answer call (seconds)
    pub answer_timeout_secs: u64,

    /// Largest serialized corpus sent as context (bytes, 0 = unlimited)
    pub max_context_bytes: usize,
}

impl QueryConfig {
    /// Get the answer timeout as a Duration
    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.answer_timeout_secs == 0 {
            return Err("answer_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            answer_timeout_secs: 60,
            max_context_bytes: 1_000_000,
        }
    }
}

//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Language the model writes titles, origins and summaries in
    pub language: String,

    /// Include the uploaded file name in the prompt as a hint
    pub file_name_hint: bool,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            extraction_timeout_secs: 60,
            language: "Lao".to_string(),
            file_name_hint: true,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: short timeout, no extra prompt hints
    pub fn aggressive() -> Self {
        Self {
            extraction_timeout_secs: 20,
            file_name_hint: false,
            ..Self::default()
        }
    }

    /// Lenient preset: long timeout for large scans
    pub fn lenient() -> Self {
        Self {
            extraction_timeout_secs: 180,
            ..Self::default()
        }
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

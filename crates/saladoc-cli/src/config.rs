//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use saladoc_domain::Locale;
use saladoc_extractor::ExtractorConfig;
use saladoc_llm::GeminiConfig;
use saladoc_query::QueryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Model endpoint settings
    #[serde(default)]
    pub gateway: GeminiConfig,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Question answering settings
    #[serde(default)]
    pub query: QueryConfig,

    /// Answer language and fallback messages
    #[serde(default)]
    pub locale: Locale,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Corpus file used when `--corpus` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file, chat history and default corpus.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".saladoc"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.gateway
            .validate()
            .map_err(|e| CliError::Config(format!("[gateway] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.query
            .validate()
            .map_err(|e| CliError::Config(format!("[query] {}", e)))?;
        self.locale
            .validate()
            .map_err(|e| CliError::Config(format!("[locale] {}", e)))?;
        Ok(())
    }

    /// Extractor settings with the configured language applied.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            language: self.locale.language.clone(),
            ..self.extractor.clone()
        }
    }

    /// Corpus file to use: the override, the configured path, or `~/.saladoc/corpus.json`.
    pub fn corpus_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.settings.corpus_path {
            return Ok(path.clone());
        }
        Ok(Self::dir()?.join("corpus.json"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            corpus_path: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SalaDoc CLI - AI-assisted office document register.
#[derive(Debug, Parser)]
#[command(name = "saladoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SALADOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corpus file (JSON array of document records)
    #[arg(long, global = true, env = "SALADOC_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs or bare text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract metadata from a scanned document and print the merged record
    Extract(ExtractArgs),

    /// Ask one question about the corpus
    Ask(AskArgs),

    /// Ask questions interactively (default)
    Chat,

    /// List the documents in the corpus, newest first
    List,

    /// Show corpus statistics
    Stats,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// File to analyze (image or PDF)
    pub file: PathBuf,

    /// Media type, detected from the file extension when omitted
    #[arg(short, long)]
    pub media_type: Option<String>,

    /// Print only the extracted fields, without merging into form defaults
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// The question as one string
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

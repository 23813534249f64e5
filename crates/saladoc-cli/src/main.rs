//! SalaDoc CLI - AI-assisted office document register.

use anyhow::Context;
use clap::Parser;
use saladoc_cli::commands;
use saladoc_cli::corpus::load_corpus;
use saladoc_cli::repl;
use saladoc_cli::{Cli, Command, Config, Formatter};
use saladoc_extractor::Extractor;
use saladoc_llm::GeminiGateway;
use saladoc_query::QueryAnswerer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config, falling back to defaults when the file does not exist
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let command = cli.command.unwrap_or(Command::Chat);

    // Commands that need neither the model nor the corpus
    if let Command::Config(args) = command {
        commands::execute_config(args, &config, &config_path, &formatter)?;
        return Ok(());
    }

    let corpus_path = config.corpus_path(cli.corpus.as_deref())?;
    let corpus = load_corpus(&corpus_path)
        .with_context(|| format!("failed to load corpus {}", corpus_path.display()))?;

    match command {
        Command::List => return Ok(commands::execute_list(&corpus, &formatter)?),
        Command::Stats => return Ok(commands::execute_stats(&corpus, &formatter)?),
        _ => {}
    }

    // Commands that call the model
    let gateway = Arc::new(GeminiGateway::from_config(&config.gateway)?);

    match command {
        Command::Extract(args) => {
            let extractor = Extractor::from_shared(gateway, config.extractor_config());
            commands::execute_extract(args, &extractor, &config.locale, &formatter).await?;
        }
        Command::Ask(args) => {
            let answerer = QueryAnswerer::from_shared(gateway, config.query.clone())
                .with_locale(config.locale.clone());
            commands::execute_ask(args, &corpus, &answerer, &formatter).await?;
        }
        Command::Chat => {
            let answerer = QueryAnswerer::from_shared(gateway, config.query.clone())
                .with_locale(config.locale.clone());
            repl::run_chat(&corpus, &answerer, config.settings.history_size, &formatter).await?;
        }
        Command::List | Command::Stats | Command::Config(_) => {}
    }

    Ok(())
}

/// Log to stderr; RUST_LOG wins unless -v is given.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

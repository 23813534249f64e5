//! Interactive chat mode.

use crate::commands::ask::ask_interruptible;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use saladoc_domain::traits::ModelGateway;
use saladoc_domain::DocumentRecord;
use saladoc_query::QueryAnswerer;
use std::path::PathBuf;

/// Run the interactive chat loop.
pub async fn run_chat<G>(
    corpus: &[DocumentRecord],
    answerer: &QueryAnswerer<G>,
    history_size: usize,
    formatter: &Formatter,
) -> Result<()>
where
    G: ModelGateway + 'static,
{
    println!("{}", formatter.assistant(&answerer.locale().greeting));
    println!(
        "{}",
        formatter.info(&format!(
            "{} documents loaded - Type 'help' for commands, 'exit' to quit",
            corpus.len()
        ))
    );
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
    })?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("saladoc> ") {
            Ok(line) => {
                let line = line.trim();

                match parse_chat_line(line) {
                    ChatLine::Blank => continue,
                    ChatLine::Exit => break,
                    ChatLine::Help => print_help(formatter),
                    ChatLine::Question(question) => {
                        editor.add_history_entry(question).ok();
                        let answer = ask_interruptible(question, corpus, answerer).await;
                        println!("{}", formatter.assistant(&formatter.format_answer(&answer)?));
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// What a line of chat input asks for.
#[derive(Debug, PartialEq, Eq)]
enum ChatLine<'a> {
    Blank,
    Exit,
    Help,
    Question(&'a str),
}

/// Classify a trimmed input line.
fn parse_chat_line(line: &str) -> ChatLine<'_> {
    match line {
        "" => ChatLine::Blank,
        "exit" | "quit" | "q" => ChatLine::Exit,
        "help" | "?" => ChatLine::Help,
        question => ChatLine::Question(question),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Ask any question about the documents in the register."));
    println!();
    println!("  <question>                     - Ask the assistant");
    println!("  Ctrl-C while waiting           - Cancel the current question");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit chat");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_line() {
        assert_eq!(parse_chat_line(""), ChatLine::Blank);
        assert_eq!(parse_chat_line("quit"), ChatLine::Exit);
        assert_eq!(parse_chat_line("?"), ChatLine::Help);
        assert_eq!(
            parse_chat_line("When is the New Year holiday?"),
            ChatLine::Question("When is the New Year holiday?")
        );
    }
}

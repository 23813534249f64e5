//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use saladoc_domain::{CorpusStats, DocumentRecord, ExtractionResult};
use saladoc_query::Answer;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format document records.
    pub fn format_records(&self, records: &[DocumentRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single record.
    pub fn format_record(&self, record: &DocumentRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["ID", record.id.as_str()]);
                builder.push_record(["Reference", record.reference_number.as_str()]);
                builder.push_record(["Title", record.title.as_str()]);
                builder.push_record(["Type", record.doc_type.label_lo()]);
                builder.push_record(["From", record.origin_dept.as_str()]);
                builder.push_record(["Date", record.date.as_str()]);
                builder.push_record(["Status", record.status.label_lo()]);
                builder.push_record(["Summary", record.summary.as_str()]);
                if let Some(name) = &record.file_name {
                    builder.push_record(["File", name.as_str()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(record.id.to_string()),
        }
    }

    /// Format the fields recovered by an extraction.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Extracted"]);
                let rows = [
                    ("Reference", result.reference_number.clone()),
                    ("Title", result.title.clone()),
                    ("Type", result.doc_type.map(|t| t.label_lo().to_string())),
                    ("From", result.origin_dept.clone()),
                    ("Date", result.date.clone()),
                    ("Status", result.status.map(|s| s.label_lo().to_string())),
                    ("Summary", result.summary.clone()),
                    ("File", result.file_name.clone()),
                ];
                for (field, value) in rows {
                    builder.push_record([field.to_string(), value.unwrap_or_else(|| "-".to_string())]);
                }
                Ok(self.render(builder))
            }
            // Quiet has no identifier to print; fall back to JSON
            OutputFormat::Json | OutputFormat::Quiet => Ok(serde_json::to_string_pretty(result)?),
        }
    }

    /// Format an answer to a question.
    pub fn format_answer(&self, answer: &Answer) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(answer)?),
            OutputFormat::Quiet => Ok(answer.text.clone()),
            OutputFormat::Table => {
                if answer.outcome.is_fallback() {
                    Ok(self.warning(&answer.text))
                } else {
                    Ok(answer.text.clone())
                }
            }
        }
    }

    /// Format corpus statistics.
    pub fn format_stats(&self, stats: &CorpusStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(stats.total.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Total", "Incoming", "Outgoing", "Pending"]);
                builder.push_record([
                    stats.total.to_string(),
                    stats.incoming.to_string(),
                    stats.outgoing.to_string(),
                    stats.pending.to_string(),
                ]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[DocumentRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No documents found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Reference", "Title", "Type", "From", "Date", "Status"]);

        for record in records {
            builder.push_record([
                record.reference_number.as_str(),
                record.title.as_str(),
                record.doc_type.label_lo(),
                record.origin_dept.as_str(),
                record.date.as_str(),
                record.status.label_lo(),
            ]);
        }

        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an assistant line in chat.
    pub fn assistant(&self, message: &str) -> String {
        self.colorize(message, "cyan")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

//! SalaDoc Extractor
//!
//! Turns an uploaded document file into a partial record using a
//! schema-constrained model call.
//!
//! # Overview
//!
//! The Extractor is the intake pathway of the register. It sends the raw file
//! bytes, tagged with their media type, to the model together with a fixed
//! instruction prompt and a JSON output schema, then validates what comes
//! back. The result is an [`ExtractionResult`] that the caller merges into its
//! form defaults with `DocumentDraft::merge`.
//!
//! # Architecture
//!
//! ```text
//! bytes + media type → Extractor → ModelGateway → JSON → parser → ExtractionResult
//! ```
//!
//! # Key Features
//!
//! - **Schema-Constrained Output**: enumerations and required fields are
//!   enforced both in the request schema and when parsing the reply
//! - **Strict Validation**: malformed or non-conforming output is a
//!   [`ExtractorError::SchemaViolation`], never silently coerced
//! - **Bounded Calls**: every request honours a timeout and an optional
//!   cancellation signal
//! - **No Retry**: failures are returned to the caller, which decides
//!
//! # Example Usage
//!
//! ```no_run
//! use saladoc_extractor::{Extractor, ExtractorConfig, ExtractionRequest};
//! use saladoc_llm::MockGateway;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = MockGateway::new().with_structured(
//!     r#"{"title":"Contract X","summary":"Network installation","type":"Contract"}"#,
//! );
//! let extractor = Extractor::new(gateway, ExtractorConfig::default());
//!
//! let request = ExtractionRequest::new(std::fs::read("scan.pdf")?, "application/pdf")
//!     .with_file_name("scan.pdf");
//! let result = extractor.extract(&request).await?;
//!
//! println!("Title: {:?}", result.title);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod schema;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_extraction;
pub use prompt::PromptBuilder;
pub use saladoc_domain::ExtractionResult;
pub use schema::{output_schema, OUTPUT_FIELDS, REQUIRED_FIELDS};
pub use types::ExtractionRequest;

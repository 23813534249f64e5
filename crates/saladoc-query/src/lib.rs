//! SalaDoc Query Answerer
//!
//! Answers free-text questions about the document register by handing the
//! whole corpus to the model as context.
//!
//! # Overview
//!
//! There is no retrieval or ranking stage: every record in the slice the
//! caller passes is serialized and sent with the question. Callers that want
//! to pre-filter simply pass a shorter slice.
//!
//! The answerer never fails. Every path ends in an [`Answer`] whose text is
//! safe to show the user, with an [`AnswerOutcome`] telling the caller whether
//! that text came from the model or is a localized fallback.
//!
//! ```text
//! question + &[DocumentRecord] → context JSON → prompt → ModelGateway → Answer
//! ```
//!
//! # Example Usage
//!
//! ```
//! use saladoc_query::{AnswerOutcome, QueryAnswerer, QueryConfig};
//! use saladoc_llm::MockGateway;
//!
//! # async fn example() {
//! let answerer = QueryAnswerer::new(MockGateway::new(), QueryConfig::default());
//!
//! let answer = answerer.respond("When is the office closed?", &[]).await;
//! assert_eq!(answer.outcome, AnswerOutcome::NoDocuments);
//! # }
//! ```

#![warn(missing_docs)]

mod answerer;
mod config;
mod context;
mod prompt;

pub use answerer::{Answer, AnswerOutcome, QueryAnswerer};
pub use config::QueryConfig;
pub use context::{serialize_corpus, CorpusEntry};
pub use prompt::QueryPromptBuilder;

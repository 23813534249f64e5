//! SalaDoc Domain Layer
//!
//! Core types shared by the extraction and query pipelines of the SalaDoc
//! document register. This crate holds no I/O: it defines the record model,
//! the merge-with-defaults policy, and the trait boundary to the generative
//! model that other crates implement or consume.
//!
//! ## Key Concepts
//!
//! - **DocumentRecord**: the unit of storage and the unit exchanged with the model
//! - **ExtractionResult**: a partial record produced from an uploaded file
//! - **DocumentDraft**: caller-supplied defaults that extraction results merge into
//! - **ModelGateway**: the external generative-AI endpoint
//!
//! ## Architecture
//!
//! ```text
//! file bytes ─▶ Extractor ─▶ ExtractionResult ─┐
//!                                              ├─▶ DocumentDraft::merge ─▶ DocumentRecord
//!                  caller defaults ────────────┘
//!
//! question + &[DocumentRecord] ─▶ QueryAnswerer ─▶ answer text
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod doc_type;
pub mod document;
pub mod extraction;
pub mod locale;
pub mod merge;
pub mod stats;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use doc_type::DocType;
pub use document::{is_iso_date, DocumentDraft, DocumentId, DocumentRecord};
pub use extraction::ExtractionResult;
pub use locale::Locale;
pub use stats::CorpusStats;
pub use status::DocStatus;

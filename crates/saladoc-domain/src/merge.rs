//! Merge policy for combining extraction results with caller defaults
//!
//! Each field is decided independently: an extracted value wins when it is
//! present and, for strings, not blank. Otherwise the default is kept. A
//! partially successful extraction therefore still yields a fully populated
//! record. The merge is a pure function of its inputs; the record identifier
//! is supplied by the caller.

use crate::{DocumentDraft, DocumentId, DocumentRecord, ExtractionResult};

impl DocumentDraft {
    /// Overlay an extraction result onto these defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use saladoc_domain::{DocType, DocumentDraft, ExtractionResult};
    /// use chrono::NaiveDate;
    ///
    /// let defaults = DocumentDraft::intake_defaults(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    /// let extracted = ExtractionResult {
    ///     title: Some("Contract X".to_string()),
    ///     doc_type: Some(DocType::Contract),
    ///     ..Default::default()
    /// };
    ///
    /// let merged = defaults.merge(&extracted);
    /// assert_eq!(merged.title, "Contract X");
    /// assert_eq!(merged.doc_type, DocType::Contract);
    /// assert_eq!(merged.date, "2024-01-01");
    /// ```
    pub fn merge(&self, extracted: &ExtractionResult) -> DocumentDraft {
        DocumentDraft {
            reference_number: pick_text(&extracted.reference_number, &self.reference_number),
            title: pick_text(&extracted.title, &self.title),
            doc_type: extracted.doc_type.unwrap_or(self.doc_type),
            origin_dept: pick_text(&extracted.origin_dept, &self.origin_dept),
            date: pick_text(&extracted.date, &self.date),
            status: extracted.status.unwrap_or(self.status),
            summary: pick_text(&extracted.summary, &self.summary),
            file_name: match extracted.file_name.as_deref() {
                Some(name) if !name.trim().is_empty() => Some(name.to_string()),
                _ => self.file_name.clone(),
            },
        }
    }
}

/// Build a record from defaults and an extraction result
///
/// Equivalent to `defaults.merge(extracted).into_record(id)`.
pub fn merge(id: DocumentId, defaults: &DocumentDraft, extracted: &ExtractionResult) -> DocumentRecord {
    defaults.merge(extracted).into_record(id)
}

fn pick_text(extracted: &Option<String>, default: &str) -> String {
    match extracted.as_deref() {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

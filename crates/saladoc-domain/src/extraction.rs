//! Extraction results - partial records recovered from an uploaded file

use crate::{DocStatus, DocType};
use serde::{Deserialize, Serialize};

/// Metadata recovered from a document file
///
/// Every field is optional: a value is `None` when the model did not supply
/// it. Enumerated fields hold typed values, so an out-of-range status or type
/// can never be represented here; it is rejected before this struct is built.
/// An extraction result never carries an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Reference number printed on the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// Subject line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Inferred document type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,

    /// Sending department or person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_dept: Option<String>,

    /// Document date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Inferred workflow status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocStatus>,

    /// Short summary in the target language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Name of the uploaded file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ExtractionResult {
    /// Number of fields that carry a usable value
    ///
    /// Strings that are empty or whitespace-only do not count, matching the
    /// merge policy.
    pub fn filled_fields(&self) -> usize {
        let strings = [
            &self.reference_number,
            &self.title,
            &self.origin_dept,
            &self.date,
            &self.summary,
            &self.file_name,
        ];
        let filled_strings = strings
            .iter()
            .filter(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
            .count();
        filled_strings + usize::from(self.doc_type.is_some()) + usize::from(self.status.is_some())
    }

    /// Whether nothing usable was extracted
    pub fn is_empty(&self) -> bool {
        self.filled_fields() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let result = ExtractionResult {
            title: Some("  ".to_string()),
            summary: Some(String::new()),
            ..Default::default()
        };
        assert!(result.is_empty());
    }

    #[test]
    fn test_filled_fields() {
        let result = ExtractionResult {
            title: Some("Contract X".to_string()),
            doc_type: Some(DocType::Contract),
            status: Some(DocStatus::Pending),
            ..Default::default()
        };
        assert_eq!(result.filled_fields(), 3);
    }

    #[test]
    fn test_serialization_omits_missing_fields() {
        let result = ExtractionResult {
            title: Some("Contract X".to_string()),
            doc_type: Some(DocType::Contract),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["type"], "Contract");
    }
}

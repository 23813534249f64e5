//! Document records - the unit of storage in the register

use crate::{DocStatus, DocType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder title applied at save time when none was entered or extracted
pub const UNTITLED: &str = "Untitled";

/// Placeholder sender applied at save time when none was entered or extracted
pub const UNKNOWN_ORIGIN: &str = "Unknown";

/// Opaque identifier for a document record
///
/// Identifiers are assigned by the caller when a record is created and never
/// change afterwards. Any non-empty string is accepted so that records
/// imported from elsewhere keep their identifiers; [`DocumentId::generate`]
/// produces a fresh UUIDv7 for new records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a new UUIDv7-based identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use saladoc_domain::DocumentId;
    ///
    /// let a = DocumentId::generate();
    /// let b = DocumentId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered document
///
/// Field names serialize in camelCase. The aliases accept corpus files written
/// with the older `refNo` / `fromDept` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique identifier, assigned by the caller
    pub id: DocumentId,

    /// External reference number printed on the document (may be empty)
    #[serde(default, alias = "refNo")]
    pub reference_number: String,

    /// Subject line of the document
    pub title: String,

    /// Kind of document
    #[serde(rename = "type")]
    pub doc_type: DocType,

    /// Sending department or person
    #[serde(default, alias = "fromDept")]
    pub origin_dept: String,

    /// Document date, `YYYY-MM-DD`
    pub date: String,

    /// Workflow status
    pub status: DocStatus,

    /// Short summary of the content (may be empty)
    #[serde(default)]
    pub summary: String,

    /// Name of the uploaded file the record was created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl DocumentRecord {
    /// Check the invariants a record must satisfy before it is stored
    ///
    /// The title must be non-empty and the date must have the `YYYY-MM-DD`
    /// shape. The date is not checked for calendar plausibility.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("id is empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if !is_iso_date(&self.date) {
            return Err(format!("date '{}' is not in YYYY-MM-DD form", self.date));
        }
        Ok(())
    }
}

/// Field values for a record that has not been saved yet
///
/// A draft carries every record field except the identifier. It is what the
/// intake form holds while the user (or the extractor) fills it in, and it is
/// the `defaults` side of [`DocumentDraft::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    /// External reference number
    pub reference_number: String,

    /// Subject line
    pub title: String,

    /// Kind of document
    #[serde(rename = "type")]
    pub doc_type: DocType,

    /// Sending department or person
    pub origin_dept: String,

    /// Document date, `YYYY-MM-DD`
    pub date: String,

    /// Workflow status
    pub status: DocStatus,

    /// Short summary
    pub summary: String,

    /// Uploaded file name, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl DocumentDraft {
    /// The values a blank intake form starts with
    ///
    /// Internal type, Draft status and the given date; every text field empty.
    pub fn intake_defaults(today: NaiveDate) -> Self {
        Self {
            reference_number: String::new(),
            title: String::new(),
            doc_type: DocType::Internal,
            origin_dept: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            status: DocStatus::Draft,
            summary: String::new(),
            file_name: None,
        }
    }

    /// Turn the draft into a stored record
    ///
    /// Blank fields get save-time fallbacks: reference `DOC-<millis>`, title
    /// [`UNTITLED`], sender [`UNKNOWN_ORIGIN`], and today's date when the date
    /// is blank. `now` is passed in so the result is reproducible.
    pub fn finalize(self, id: DocumentId, now: DateTime<Utc>) -> DocumentRecord {
        DocumentRecord {
            id,
            reference_number: non_blank_or(self.reference_number, || {
                format!("DOC-{}", now.timestamp_millis())
            }),
            title: non_blank_or(self.title, || UNTITLED.to_string()),
            doc_type: self.doc_type,
            origin_dept: non_blank_or(self.origin_dept, || UNKNOWN_ORIGIN.to_string()),
            date: non_blank_or(self.date, || now.date_naive().format("%Y-%m-%d").to_string()),
            status: self.status,
            summary: self.summary,
            file_name: self.file_name,
        }
    }

    /// Turn the draft into a record without applying any fallbacks
    pub fn into_record(self, id: DocumentId) -> DocumentRecord {
        DocumentRecord {
            id,
            reference_number: self.reference_number,
            title: self.title,
            doc_type: self.doc_type,
            origin_dept: self.origin_dept,
            date: self.date,
            status: self.status,
            summary: self.summary,
            file_name: self.file_name,
        }
    }
}

fn non_blank_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value
    }
}

/// Whether `s` has the `YYYY-MM-DD` shape (digits and dashes only)
///
/// # Examples
///
/// ```
/// use saladoc_domain::is_iso_date;
///
/// assert!(is_iso_date("2024-04-01"));
/// assert!(!is_iso_date("01/04/2024"));
/// ```
pub fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new("1"),
            reference_number: "MOF-2024-001".to_string(),
            title: "Holiday notice".to_string(),
            doc_type: DocType::Internal,
            origin_dept: "Finance".to_string(),
            date: "2024-04-01".to_string(),
            status: DocStatus::Approved,
            summary: "Office closed Apr 14-18".to_string(),
            file_name: None,
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["referenceNumber"], "MOF-2024-001");
        assert_eq!(json["originDept"], "Finance");
        assert_eq!(json["type"], "Internal");
        assert!(json.get("fileName").is_none());
    }

    #[test]
    fn test_record_accepts_legacy_keys() {
        let json = r#"{
            "id": "2",
            "refNo": "EXT-2024-045",
            "title": "IT partnership contract",
            "type": "Contract",
            "fromDept": "Lao Telecom",
            "date": "2024-05-10",
            "status": "Pending",
            "summary": "Draft network installation contract"
        }"#;
        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference_number, "EXT-2024-045");
        assert_eq!(record.origin_dept, "Lao Telecom");
        assert_eq!(record.doc_type, DocType::Contract);
    }

    #[test]
    fn test_validate() {
        assert!(sample_record().validate().is_ok());

        let mut record = sample_record();
        record.title = "   ".to_string();
        assert!(record.validate().is_err());

        let mut record = sample_record();
        record.date = "April 1".to_string();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_iso_date_shape_only() {
        assert!(is_iso_date("2024-01-01"));
        // Shape is checked, plausibility is not
        assert!(is_iso_date("2024-13-45"));
        assert!(!is_iso_date("2024-1-01"));
        assert!(!is_iso_date("2024/01/01"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn test_intake_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let draft = DocumentDraft::intake_defaults(today);
        assert_eq!(draft.date, "2024-06-03");
        assert_eq!(draft.doc_type, DocType::Internal);
        assert_eq!(draft.status, DocStatus::Draft);
        assert!(draft.title.is_empty());
        assert!(draft.file_name.is_none());
    }

    #[test]
    fn test_finalize_applies_fallbacks() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        let mut draft = DocumentDraft::intake_defaults(now.date_naive());
        draft.date = String::new();

        let record = draft.finalize(DocumentId::new("42"), now);
        assert_eq!(record.reference_number, format!("DOC-{}", now.timestamp_millis()));
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.origin_dept, UNKNOWN_ORIGIN);
        assert_eq!(record.date, "2024-06-03");
        assert_eq!(record.summary, "");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_finalize_keeps_entered_values() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        let mut draft = DocumentDraft::intake_defaults(now.date_naive());
        draft.reference_number = "INT-2024-112".to_string();
        draft.title = "Quarterly report".to_string();
        draft.origin_dept = "Accounting".to_string();

        let record = draft.finalize(DocumentId::new("3"), now);
        assert_eq!(record.reference_number, "INT-2024-112");
        assert_eq!(record.title, "Quarterly report");
        assert_eq!(record.origin_dept, "Accounting");
    }
}

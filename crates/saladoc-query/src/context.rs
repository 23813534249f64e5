//! Corpus serialization for the model context

use saladoc_domain::{DocStatus, DocType, DocumentRecord};
use serde::Serialize;

/// The view of one record that the model sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusEntry<'a> {
    /// Record identifier
    pub id: &'a str,
    /// Reference number printed on the document
    pub reference_number: &'a str,
    /// Subject line
    pub title: &'a str,
    /// Document type
    #[serde(rename = "type")]
    pub doc_type: DocType,
    /// Document date
    pub date: &'a str,
    /// Summary
    pub summary: &'a str,
    /// Workflow status
    pub status: DocStatus,
    /// Sending department or person
    pub origin_dept: &'a str,
}

impl<'a> From<&'a DocumentRecord> for CorpusEntry<'a> {
    fn from(record: &'a DocumentRecord) -> Self {
        Self {
            id: record.id.as_str(),
            reference_number: &record.reference_number,
            title: &record.title,
            doc_type: record.doc_type,
            date: &record.date,
            summary: &record.summary,
            status: record.status,
            origin_dept: &record.origin_dept,
        }
    }
}

/// Serialize records, in the order given, as a compact JSON array
pub fn serialize_corpus(corpus: &[DocumentRecord]) -> Result<String, serde_json::Error> {
    let entries: Vec<CorpusEntry<'_>> = corpus.iter().map(CorpusEntry::from).collect();
    serde_json::to_string(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saladoc_domain::DocumentId;
    use serde_json::Value;

    fn record(id: &str, title: &str) -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new(id),
            reference_number: format!("REF-{}", id),
            title: title.to_string(),
            doc_type: DocType::Internal,
            origin_dept: "Finance".to_string(),
            date: "2024-04-01".to_string(),
            status: DocStatus::Approved,
            summary: "Summary".to_string(),
            file_name: Some("scan.png".to_string()),
        }
    }

    #[test]
    fn test_entry_fields() {
        let json = serialize_corpus(&[record("1", "Holiday notice")]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let entry = &value[0];

        assert_eq!(entry["id"], "1");
        assert_eq!(entry["referenceNumber"], "REF-1");
        assert_eq!(entry["title"], "Holiday notice");
        assert_eq!(entry["type"], "Internal");
        assert_eq!(entry["date"], "2024-04-01");
        assert_eq!(entry["summary"], "Summary");
        assert_eq!(entry["status"], "Approved");
        assert_eq!(entry["originDept"], "Finance");
        // Upload details are not part of the context
        assert!(entry.get("fileName").is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let corpus = vec![record("b", "Second"), record("a", "First")];
        let value: Value = serde_json::from_str(&serialize_corpus(&corpus).unwrap()).unwrap();
        assert_eq!(value[0]["id"], "b");
        assert_eq!(value[1]["id"], "a");
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(serialize_corpus(&[]).unwrap(), "[]");
    }
}

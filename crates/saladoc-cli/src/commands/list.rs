//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use saladoc_domain::DocumentRecord;

/// Execute the list command, newest documents first.
pub fn execute_list(corpus: &[DocumentRecord], formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_records(&newest_first(corpus))?);
    Ok(())
}

/// Order records by date, most recent first; equal dates keep corpus order.
fn newest_first(corpus: &[DocumentRecord]) -> Vec<DocumentRecord> {
    let mut records = corpus.to_vec();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use saladoc_domain::{DocStatus, DocType, DocumentId};

    fn record(id: &str, date: &str) -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new(id),
            reference_number: format!("REF-{}", id),
            title: format!("Document {}", id),
            doc_type: DocType::Internal,
            origin_dept: "Finance".to_string(),
            date: date.to_string(),
            status: DocStatus::Draft,
            summary: String::new(),
            file_name: None,
        }
    }

    #[test]
    fn test_newest_first() {
        let corpus = [
            record("a", "2024-04-01"),
            record("b", "2024-05-10"),
            record("c", "2024-04-01"),
        ];
        let ids: Vec<String> = newest_first(&corpus).iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_execute_list_empty_corpus() {
        let formatter = Formatter::new(crate::config::OutputFormat::Table, false);
        assert!(execute_list(&[], &formatter).is_ok());
    }
}

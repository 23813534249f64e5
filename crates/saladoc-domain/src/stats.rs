//! Corpus statistics shown on the register dashboard

use crate::{DocStatus, DocType, DocumentRecord};
use serde::Serialize;

/// Document counts over a corpus snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    /// All documents
    pub total: usize,
    /// Documents of type Incoming
    pub incoming: usize,
    /// Documents of type Outgoing
    pub outgoing: usize,
    /// Documents awaiting approval
    pub pending: usize,
}

impl CorpusStats {
    /// Count documents in a corpus snapshot
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.doc_type {
                DocType::Incoming => stats.incoming += 1,
                DocType::Outgoing => stats.outgoing += 1,
                _ => {}
            }
            if record.status == DocStatus::Pending {
                stats.pending += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentId;

    fn record(id: &str, doc_type: DocType, status: DocStatus) -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new(id),
            reference_number: String::new(),
            title: format!("Document {}", id),
            doc_type,
            origin_dept: String::new(),
            date: "2024-01-01".to_string(),
            status,
            summary: String::new(),
            file_name: None,
        }
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(CorpusStats::from_records(&[]), CorpusStats::default());
    }

    #[test]
    fn test_counts() {
        let records = vec![
            record("1", DocType::Incoming, DocStatus::Pending),
            record("2", DocType::Incoming, DocStatus::Approved),
            record("3", DocType::Outgoing, DocStatus::Pending),
            record("4", DocType::Contract, DocStatus::Draft),
        ];
        let stats = CorpusStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.incoming, 2);
        assert_eq!(stats.outgoing, 1);
        assert_eq!(stats.pending, 2);
    }
}

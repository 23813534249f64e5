//! Corpus files and media type detection.

use crate::error::{CliError, Result};
use saladoc_domain::DocumentRecord;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a corpus snapshot from a JSON array of records.
///
/// A missing file is an empty corpus. Every record must pass validation.
pub fn load_corpus(path: &Path) -> Result<Vec<DocumentRecord>> {
    if !path.exists() {
        debug!("Corpus file {} not found; using empty corpus", path.display());
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)?;
    let records: Vec<DocumentRecord> = serde_json::from_str(&contents)?;

    for record in &records {
        record.validate().map_err(|reason| CliError::InvalidRecord {
            id: record.id.to_string(),
            reason,
        })?;
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Guess the media type of a document from its file extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_corpus_is_empty() {
        let dir = tempdir().unwrap();
        let records = load_corpus(&dir.path().join("none.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_corpus_with_legacy_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"[{"id":"1","refNo":"MOF-2024-001","title":"Holiday notice","type":"Internal",
                "fromDept":"Ministry of Finance","date":"2024-04-01","status":"Approved",
                "summary":"Closed April 14-18"}]"#,
        )
        .unwrap();

        let records = load_corpus(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference_number, "MOF-2024-001");
        assert_eq!(records[0].origin_dept, "Ministry of Finance");
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"[{"id":"7","title":"Bad date","type":"Other","date":"April 1","status":"Draft"}]"#,
        )
        .unwrap();

        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidRecord { ref id, .. } if id == "7"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_corpus(&path), Err(CliError::Serialization(_))));
    }

    #[test]
    fn test_demo_corpus() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/corpus.json");
        let records = load_corpus(&path).unwrap();
        assert_eq!(records.len(), 3);

        let stats = saladoc_domain::CorpusStats::from_records(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.incoming, 0);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_media_type_detection() {
        assert_eq!(media_type_for_path(Path::new("scan.PDF")), Some("application/pdf"));
        assert_eq!(media_type_for_path(Path::new("photo.jpg")), Some("image/jpeg"));
        assert_eq!(media_type_for_path(Path::new("a/b/c.png")), Some("image/png"));
        assert_eq!(media_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(media_type_for_path(Path::new("no_extension")), None);
    }
}

//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::corpus::media_type_for_path;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Utc;
use saladoc_domain::traits::ModelGateway;
use saladoc_domain::{DocumentDraft, DocumentId, DocumentRecord, ExtractionResult, Locale};
use saladoc_extractor::{ExtractionRequest, Extractor, ExtractorError};
use std::path::Path;
use tracing::warn;

/// Execute the extract command.
///
/// A failed analysis is not fatal: the user is told to complete the record
/// by hand and gets the intake defaults instead.
pub async fn execute_extract<G>(
    args: ExtractArgs,
    extractor: &Extractor<G>,
    locale: &Locale,
    formatter: &Formatter,
) -> Result<()>
where
    G: ModelGateway + 'static,
{
    let request = build_request(&args.file, args.media_type.as_deref())?;
    let (extracted, failure) = analyze(extractor, &request).await;
    if failure.is_some() {
        eprintln!("{}", formatter.warning(&locale.extraction_failed));
    }

    if args.raw {
        println!("{}", formatter.format_extraction(&extracted)?);
        return Ok(());
    }

    let record = into_record(&extracted)?;
    println!("{}", formatter.format_record(&record)?);

    Ok(())
}

/// Read a file into an extraction request.
fn build_request(path: &Path, media_type: Option<&str>) -> Result<ExtractionRequest> {
    let media_type = match media_type {
        Some(m) => m.to_string(),
        None => media_type_for_path(path)
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Cannot detect the media type of {}; pass --media-type",
                    path.display()
                ))
            })?
            .to_string(),
    };

    let data = std::fs::read(path)?;
    let mut request = ExtractionRequest::new(data, media_type);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        request = request.with_file_name(name);
    }
    Ok(request)
}

/// Run the extractor, substituting an empty result on failure.
///
/// The empty result keeps the uploaded file name so the record still points
/// at its scan.
async fn analyze<G>(
    extractor: &Extractor<G>,
    request: &ExtractionRequest,
) -> (ExtractionResult, Option<ExtractorError>)
where
    G: ModelGateway + 'static,
{
    match extractor.extract(request).await {
        Ok(extracted) => (extracted, None),
        Err(e) => {
            warn!(error = %e, retryable = e.is_retryable(), "Extraction failed; using intake defaults");
            let fallback = ExtractionResult {
                file_name: request.file_name.clone(),
                ..Default::default()
            };
            (fallback, Some(e))
        }
    }
}

/// Merge an extraction into today's intake defaults and apply save-time fallbacks.
fn into_record(extracted: &ExtractionResult) -> Result<DocumentRecord> {
    let now = Utc::now();
    let record = DocumentDraft::intake_defaults(now.date_naive())
        .merge(extracted)
        .finalize(DocumentId::generate(), now);

    record
        .validate()
        .map_err(|reason| CliError::InvalidRecord {
            id: record.id.to_string(),
            reason,
        })?;
    Ok(record)
}

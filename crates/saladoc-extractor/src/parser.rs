//! Parse model output into an extraction result

use crate::error::ExtractorError;
use saladoc_domain::{is_iso_date, DocStatus, DocType, ExtractionResult};
use serde::Deserialize;

/// The reply shape the output schema permits
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ExtractionPayload {
    #[serde(default)]
    reference_number: Option<String>,
    title: String,
    #[serde(default)]
    origin_dept: Option<String>,
    #[serde(default)]
    date: Option<String>,
    summary: String,
    #[serde(rename = "type")]
    doc_type: DocType,
    #[serde(default)]
    status: Option<DocStatus>,
}

/// Parse and validate the model's JSON reply
///
/// Rejects, as [`ExtractorError::SchemaViolation`]:
/// - an empty reply or text that is not a JSON object
/// - unknown fields, or `type`/`status` outside their enumerations
/// - a missing or blank `title`, `summary` or `type`
/// - a non-empty `date` that is not `YYYY-MM-DD`
///
/// Values are returned as the model produced them; nothing is coerced.
pub fn parse_extraction(response: &str) -> Result<ExtractionResult, ExtractorError> {
    let json_str = extract_json(response)?;
    let payload: ExtractionPayload = serde_json::from_str(json_str)?;

    if payload.title.trim().is_empty() {
        return Err(ExtractorError::SchemaViolation("title is empty".to_string()));
    }
    if payload.summary.trim().is_empty() {
        return Err(ExtractorError::SchemaViolation("summary is empty".to_string()));
    }
    if let Some(date) = payload.date.as_deref() {
        if !date.trim().is_empty() && !is_iso_date(date) {
            return Err(ExtractorError::SchemaViolation(format!(
                "date '{}' is not in YYYY-MM-DD format",
                date
            )));
        }
    }

    Ok(ExtractionResult {
        reference_number: payload.reference_number,
        title: Some(payload.title),
        doc_type: Some(payload.doc_type),
        origin_dept: payload.origin_dept,
        date: payload.date,
        status: payload.status,
        summary: Some(payload.summary),
        file_name: None,
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::SchemaViolation("empty response".to_string()));
    }

    // Models occasionally fence the object even when asked not to
    let Some(rest) = trimmed.strip_prefix("```") else {
        return Ok(trimmed);
    };
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        // Whole block on one line, possibly with a language tag
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    let body = body.trim_end();
    Ok(body.strip_suffix("```").unwrap_or(body).trim())
}

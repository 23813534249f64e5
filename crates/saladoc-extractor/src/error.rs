//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// The file contained no bytes
    #[error("Empty input: the file has no content")]
    EmptyInput,

    /// The gateway does not accept this media type
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The model could not be reached, rejected the request, or timed out
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// The model replied with output that does not conform to the schema
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The caller cancelled the request
    #[error("Extraction cancelled")]
    Cancelled,
}

impl ExtractorError {
    /// Whether the caller may reasonably re-issue the same request
    ///
    /// Only gateway failures qualify. A schema violation would most likely
    /// repeat, and the remaining variants describe the request itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractorError::Gateway(_))
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::SchemaViolation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_gateway_errors_are_retryable() {
        assert!(ExtractorError::Gateway("timeout".into()).is_retryable());
        assert!(!ExtractorError::SchemaViolation("bad".into()).is_retryable());
        assert!(!ExtractorError::EmptyInput.is_retryable());
        assert!(!ExtractorError::Cancelled.is_retryable());
        assert!(!ExtractorError::UnsupportedMediaType("text/x".into()).is_retryable());
    }

    #[test]
    fn test_json_error_is_schema_violation() {
        let err: ExtractorError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ExtractorError::SchemaViolation(_)));
    }
}

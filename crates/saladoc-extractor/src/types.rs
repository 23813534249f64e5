//! Request types for extraction

/// A file submitted for metadata extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Raw file bytes, already read by the caller
    pub data: Vec<u8>,

    /// Declared media type, e.g. `application/pdf`
    pub media_type: String,

    /// Name of the uploaded file, carried into the result
    pub file_name: Option<String>,
}

impl ExtractionRequest {
    /// Create a request for these bytes
    pub fn new(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
            file_name: None,
        }
    }

    /// Attach the uploaded file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

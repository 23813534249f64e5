//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_extraction;
use crate::prompt::PromptBuilder;
use crate::schema::output_schema;
use crate::types::ExtractionRequest;
use saladoc_domain::traits::{Attachment, ModelGateway};
use saladoc_domain::ExtractionResult;
use saladoc_llm::{guard, Cancellation, Guarded};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Extractor turns an uploaded file into a partial document record
pub struct Extractor<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
    config: ExtractorConfig,
}

impl<G> Extractor<G>
where
    G: ModelGateway + 'static,
{
    /// Create a new Extractor
    pub fn new(gateway: G, config: ExtractorConfig) -> Self {
        Self::from_shared(Arc::new(gateway), config)
    }

    /// Create an Extractor over a gateway shared with other components
    pub fn from_shared(gateway: Arc<G>, config: ExtractorConfig) -> Self {
        Self { gateway, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract metadata from a file, bounded by the configured timeout
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        self.run(request, None).await
    }

    /// Extract metadata from a file, abandoning the call if `cancel` fires
    pub async fn extract_with_cancel(
        &self,
        request: &ExtractionRequest,
        cancel: &Cancellation,
    ) -> Result<ExtractionResult, ExtractorError> {
        self.run(request, Some(cancel)).await
    }

    async fn run(
        &self,
        request: &ExtractionRequest,
        cancel: Option<&Cancellation>,
    ) -> Result<ExtractionResult, ExtractorError> {
        if request.data.is_empty() {
            return Err(ExtractorError::EmptyInput);
        }
        if !self.gateway.supports_media_type(&request.media_type) {
            return Err(ExtractorError::UnsupportedMediaType(request.media_type.clone()));
        }

        info!(
            "Starting extraction: media type '{}', {} bytes, model '{}'",
            request.media_type,
            request.data.len(),
            self.gateway.model_name()
        );
        let start = Instant::now();

        let file_name = request.file_name.as_deref().filter(|_| self.config.file_name_hint);
        let prompt = PromptBuilder::new(&self.config.language)
            .with_file_name(file_name)
            .build();
        let schema = output_schema();
        let attachment = Attachment {
            media_type: &request.media_type,
            data: &request.data,
        };

        debug!("Prompt length: {} chars", prompt.len());

        let timeout = self.config.extraction_timeout();
        let call = self.gateway.generate_structured(&prompt, Some(attachment), &schema);

        let response = match guard(call, timeout, cancel).await {
            Guarded::Completed(Ok(text)) => text,
            Guarded::Completed(Err(e)) => {
                warn!("Extraction gateway call failed: {}", e);
                return Err(ExtractorError::Gateway(e.to_string()));
            }
            Guarded::TimedOut(after) => {
                warn!("Extraction timed out after {:?}", after);
                return Err(ExtractorError::Gateway(format!("request timed out after {:?}", after)));
            }
            Guarded::Cancelled => {
                info!("Extraction cancelled by caller");
                return Err(ExtractorError::Cancelled);
            }
        };

        debug!("Model response length: {} chars", response.len());

        let mut result = parse_extraction(&response).inspect_err(|e| {
            warn!("Model output rejected: {}", e);
        })?;
        result.file_name = request
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        info!(
            "Extraction complete: {} fields in {} ms",
            result.filled_fields(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

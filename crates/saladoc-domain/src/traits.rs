//! Trait definitions for external interactions
//!
//! These traits define the boundary between the register core and the
//! generative model. Implementations live in other crates (saladoc-llm).

use async_trait::async_trait;

/// Binary payload attached to a model request
#[derive(Debug, Clone, Copy)]
pub struct Attachment<'a> {
    /// Declared media type, e.g. `application/pdf`
    pub media_type: &'a str,

    /// Raw file bytes
    pub data: &'a [u8],
}

/// Generative-AI endpoint used by the extractor and the query answerer
///
/// The core issues requests through this trait and never deals with
/// authentication, transport or model selection itself. Responses are
/// returned as raw text; validating structured output against its schema is
/// the caller's job.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Error type for gateway operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate free-form text for a prompt
    async fn generate_text(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate JSON constrained by `schema`, optionally with a file attached
    ///
    /// Returns the JSON document as text, exactly as the model produced it.
    async fn generate_structured(
        &self,
        prompt: &str,
        attachment: Option<Attachment<'_>>,
        schema: &serde_json::Value,
    ) -> Result<String, Self::Error>;

    /// Whether files of this media type can be attached
    fn supports_media_type(&self, media_type: &str) -> bool;

    /// Name of the model behind this gateway, for logging and metadata
    fn model_name(&self) -> &str;
}

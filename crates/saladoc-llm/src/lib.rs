//! SalaDoc Model Gateway Layer
//!
//! Implementations of the `ModelGateway` trait from `saladoc-domain`, plus the
//! call guard the extraction and query pipelines use to bound every request
//! by a timeout and a cancellation signal.
//!
//! # Gateways
//!
//! - `MockGateway`: Deterministic fake for testing
//! - `GeminiGateway`: Gemini `generateContent` API over HTTPS
//!
//! # Examples
//!
//! ```
//! use saladoc_llm::MockGateway;
//! use saladoc_domain::traits::ModelGateway;
//!
//! # async fn example() {
//! let gateway = MockGateway::new().with_text("Hello from the model!");
//! let result = gateway.generate_text("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod guard;

use async_trait::async_trait;
use saladoc_domain::traits::{Attachment, ModelGateway};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiGateway};
pub use guard::{cancellation, guard, CancelHandle, Cancellation, Guarded};

/// Media types the bundled gateways accept as attachments
pub const DEFAULT_MEDIA_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
    "application/pdf",
];

/// Errors that can occur while talking to a model gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network or transport failure (endpoint unreachable, connection reset)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Attachment exceeds what the gateway accepts inline
    #[error("Payload too large: {size} bytes (max: {max})")]
    PayloadTooLarge {
        /// Attachment size in bytes
        size: usize,
        /// Largest accepted size in bytes
        max: usize,
    },

    /// Attachment media type the gateway cannot handle
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Non-success HTTP status not covered by a more specific variant
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message or body preview
        message: String,
    },

    /// Response envelope could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("Gateway error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether re-issuing the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Communication(_)
            | GatewayError::Timeout(_)
            | GatewayError::RateLimitExceeded => true,
            GatewayError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Which gateway operation a recorded request went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `generate_text`
    Text,
    /// `generate_structured`
    Structured,
}

/// A request observed by [`MockGateway`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Operation used
    pub kind: RequestKind,
    /// Prompt text, verbatim
    pub prompt: String,
    /// Media type of the attachment, if one was sent
    pub media_type: Option<String>,
    /// Attachment size in bytes (0 when none)
    pub attachment_len: usize,
    /// Output schema for structured requests
    pub schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(GatewayError),
}

/// Mock gateway for deterministic testing
///
/// Returns pre-configured replies without making any network calls, records
/// every request it receives, and can be told to fail or to stall so that
/// timeout and cancellation paths can be exercised.
///
/// # Examples
///
/// ```
/// use saladoc_llm::{GatewayError, MockGateway};
/// use saladoc_domain::traits::ModelGateway;
///
/// # async fn example() {
/// let gateway = MockGateway::new()
///     .with_structured(r#"{"title":"X","summary":"Y","type":"Other"}"#)
///     .with_text_error(GatewayError::RateLimitExceeded);
///
/// assert!(gateway.generate_text("question").await.is_err());
/// assert_eq!(gateway.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockGateway {
    text_reply: MockReply,
    structured_reply: MockReply,
    delay: Option<Duration>,
    media_types: Vec<String>,
    model_name: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGateway {
    /// Create a mock that answers every request with an empty string
    pub fn new() -> Self {
        Self {
            text_reply: MockReply::Text(String::new()),
            structured_reply: MockReply::Text(String::new()),
            delay: None,
            media_types: DEFAULT_MEDIA_TYPES.iter().map(|s| s.to_string()).collect(),
            model_name: "mock".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply to `generate_text` with this text
    pub fn with_text(mut self, response: impl Into<String>) -> Self {
        self.text_reply = MockReply::Text(response.into());
        self
    }

    /// Reply to `generate_structured` with this raw JSON text
    pub fn with_structured(mut self, response: impl Into<String>) -> Self {
        self.structured_reply = MockReply::Text(response.into());
        self
    }

    /// Fail `generate_text` with this error
    pub fn with_text_error(mut self, error: GatewayError) -> Self {
        self.text_reply = MockReply::Error(error);
        self
    }

    /// Fail `generate_structured` with this error
    pub fn with_structured_error(mut self, error: GatewayError) -> Self {
        self.structured_reply = MockReply::Error(error);
        self
    }

    /// Wait this long before replying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the list of accepted attachment media types
    pub fn with_media_types(mut self, media_types: &[&str]) -> Self {
        self.media_types = media_types.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Get the number of requests received
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Reset the recorded requests
    pub fn reset_call_count(&self) {
        self.lock_requests().clear();
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock_requests().last().cloned()
    }

    fn lock_requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn reply(&self, request: RecordedRequest, reply: &MockReply) -> Result<String, GatewayError> {
        self.lock_requests().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Error(error) => Err(error.clone()),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    type Error = GatewayError;

    async fn generate_text(&self, prompt: &str) -> Result<String, Self::Error> {
        let request = RecordedRequest {
            kind: RequestKind::Text,
            prompt: prompt.to_string(),
            media_type: None,
            attachment_len: 0,
            schema: None,
        };
        self.reply(request, &self.text_reply).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        attachment: Option<Attachment<'_>>,
        schema: &serde_json::Value,
    ) -> Result<String, Self::Error> {
        let request = RecordedRequest {
            kind: RequestKind::Structured,
            prompt: prompt.to_string(),
            media_type: attachment.map(|a| a.media_type.to_string()),
            attachment_len: attachment.map_or(0, |a| a.data.len()),
            schema: Some(schema.clone()),
        };
        self.reply(request, &self.structured_reply).await
    }

    fn supports_media_type(&self, media_type: &str) -> bool {
        self.media_types.iter().any(|m| m.eq_ignore_ascii_case(media_type))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_gateway_default() {
        let gateway = MockGateway::new();
        let result = gateway.generate_text("any prompt").await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_mock_gateway_separate_replies() {
        let gateway = MockGateway::new()
            .with_text("free text")
            .with_structured("{}");

        assert_eq!(gateway.generate_text("q").await.unwrap(), "free text");
        assert_eq!(
            gateway.generate_structured("p", None, &json!({})).await.unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn test_mock_gateway_records_requests() {
        let gateway = MockGateway::new();
        let data = [1u8, 2, 3];
        let attachment = Attachment { media_type: "image/png", data: &data };
        let schema = json!({"type": "object"});

        gateway.generate_structured("extract", Some(attachment), &schema).await.unwrap();
        gateway.generate_text("ask").await.unwrap();

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, RequestKind::Structured);
        assert_eq!(requests[0].media_type.as_deref(), Some("image/png"));
        assert_eq!(requests[0].attachment_len, 3);
        assert_eq!(requests[0].schema, Some(schema));
        assert_eq!(requests[1].kind, RequestKind::Text);
        assert_eq!(requests[1].prompt, "ask");
    }

    #[tokio::test]
    async fn test_mock_gateway_call_count() {
        let gateway = MockGateway::new();
        assert_eq!(gateway.call_count(), 0);

        gateway.generate_text("prompt1").await.unwrap();
        gateway.generate_text("prompt2").await.unwrap();
        assert_eq!(gateway.call_count(), 2);

        gateway.reset_call_count();
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_gateway_error() {
        let gateway = MockGateway::new()
            .with_structured_error(GatewayError::Timeout("slow".to_string()));

        let result = gateway.generate_structured("p", None, &json!({})).await;
        assert!(matches!(result, Err(GatewayError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_mock_gateway_clone_shares_requests() {
        let gateway1 = MockGateway::new();
        let gateway2 = gateway1.clone();

        gateway1.generate_text("test").await.unwrap();

        assert_eq!(gateway1.call_count(), 1);
        assert_eq!(gateway2.call_count(), 1);
    }

    #[test]
    fn test_media_type_support() {
        let gateway = MockGateway::new();
        assert!(gateway.supports_media_type("application/pdf"));
        assert!(gateway.supports_media_type("IMAGE/PNG"));
        assert!(!gateway.supports_media_type("application/zip"));

        let gateway = gateway.with_media_types(&["text/plain"]);
        assert!(gateway.supports_media_type("text/plain"));
        assert!(!gateway.supports_media_type("application/pdf"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(GatewayError::Timeout("t".into()).is_transient());
        assert!(GatewayError::Communication("c".into()).is_transient());
        assert!(GatewayError::RateLimitExceeded.is_transient());
        assert!(GatewayError::Status { status: 503, message: String::new() }.is_transient());
        assert!(!GatewayError::Status { status: 400, message: String::new() }.is_transient());
        assert!(!GatewayError::Authentication("bad key".into()).is_transient());
        assert!(!GatewayError::PayloadTooLarge { size: 2, max: 1 }.is_transient());
    }
}

//! Gemini Gateway Implementation
//!
//! Talks to the Gemini `generateContent` REST API.
//!
//! # Features
//!
//! - Inline base64 attachments for images and PDF
//! - JSON output constrained by a response schema
//! - HTTP status mapped onto [`GatewayError`] variants
//! - Optional retry of transient failures with exponential backoff
//!
//! # Examples
//!
//! ```no_run
//! use saladoc_llm::GeminiGateway;
//!
//! let gateway = GeminiGateway::new(
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-2.5-flash",
//!     "my-api-key",
//! ).unwrap();
//! ```

use crate::{GatewayError, DEFAULT_MEDIA_TYPES};
use async_trait::async_trait;
use base64::Engine;
use saladoc_domain::traits::{Attachment, ModelGateway};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default timeout for a single HTTP request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request (no retry)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Upper bound on attempts per request
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Longest wait between two attempts
const MAX_BACKOFF_SECS: u64 = 60;

/// Largest attachment sent inline (20 MiB)
pub const DEFAULT_MAX_INLINE_BYTES: usize = 20 * 1024 * 1024;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Settings for building a [`GeminiGateway`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL
    pub endpoint: String,

    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,

    /// Name of the environment variable that holds the API key
    pub api_key_env: String,

    /// Timeout for one HTTP request (seconds)
    pub timeout_secs: u64,

    /// Attempts per request; values above 1 retry transient failures
    pub max_attempts: u32,

    /// Largest attachment accepted (bytes)
    pub max_inline_bytes: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_inline_bytes: DEFAULT_MAX_INLINE_BYTES,
        }
    }
}

impl GeminiConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(format!("max_attempts must be at most {}", MAX_ATTEMPTS_LIMIT));
        }
        Ok(())
    }
}

/// Wait before the attempt after `attempt`: 1s, 2s, 4s, ... capped at a minute
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

/// Gemini API gateway
pub struct GeminiGateway {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_attempts: u32,
    max_inline_bytes: usize,
}

/// Request body for `generateContent`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_json_schema: &'a serde_json::Value,
}

/// Response from `generateContent`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> String {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return String::new();
        };
        if let Some(reason) = candidate.finish_reason.as_deref() {
            debug!("Gemini finish reason: {}", reason);
        }

        candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiGateway {
    /// Create a new Gemini gateway
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://generativelanguage.googleapis.com/v1beta")
    /// - `model`: Model to use (e.g., "gemini-2.5-flash")
    /// - `api_key`: API key sent in the `x-goog-api-key` header
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Other`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::build(
            endpoint.into(),
            model.into(),
            api_key.into(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a gateway from settings, reading the API key from the environment
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Authentication`] if the key variable is unset
    /// or empty, and [`GatewayError::Other`] for invalid settings.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, GatewayError> {
        config.validate().map_err(GatewayError::Other)?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::Authentication(format!(
                    "environment variable {} is not set",
                    config.api_key_env
                ))
            })?;

        let gateway = Self::build(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(gateway
            .with_max_attempts(config.max_attempts)
            .with_max_inline_bytes(config.max_inline_bytes))
    }

    fn build(endpoint: String, model: String, api_key: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_inline_bytes: DEFAULT_MAX_INLINE_BYTES,
        })
    }

    /// Set the number of attempts per request (1 to [`MAX_ATTEMPTS_LIMIT`])
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT);
        self
    }

    /// Set the largest attachment accepted
    pub fn with_max_inline_bytes(mut self, max_inline_bytes: usize) -> Self {
        self.max_inline_bytes = max_inline_bytes;
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Send a request, retrying transient failures up to `max_attempts`
    async fn send(&self, body: &GenerateContentRequest<'_>) -> Result<String, GatewayError> {
        let url = self.url();
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.send_once(&url, body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempts < self.max_attempts => {
                    let delay = backoff_delay(attempts);
                    warn!("Gemini request failed (attempt {}): {}; retrying in {:?}", attempts, e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, url: &str, body: &GenerateContentRequest<'_>) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        let text = response.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text, &self.model));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            GatewayError::InvalidResponse(format!(
                "Failed to parse response: {} | body={}",
                e,
                preview_body(&text)
            ))
        })?;

        Ok(parsed.into_text())
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    type Error = GatewayError;

    async fn generate_text(&self, prompt: &str) -> Result<String, Self::Error> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::Text { text: prompt }],
            }],
            generation_config: None,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "gemini generate_text");
        self.send(&body).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        attachment: Option<Attachment<'_>>,
        schema: &serde_json::Value,
    ) -> Result<String, Self::Error> {
        let mut parts = vec![Part::Text { text: prompt }];

        if let Some(attachment) = attachment {
            if !self.supports_media_type(attachment.media_type) {
                return Err(GatewayError::UnsupportedMediaType(attachment.media_type.to_string()));
            }
            if attachment.data.len() > self.max_inline_bytes {
                return Err(GatewayError::PayloadTooLarge {
                    size: attachment.data.len(),
                    max: self.max_inline_bytes,
                });
            }
            parts.push(Part::Inline {
                inline_data: InlineData {
                    mime_type: attachment.media_type,
                    data: base64::engine::general_purpose::STANDARD.encode(attachment.data),
                },
            });
        }

        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_json_schema: schema,
            }),
        };

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            attachment_len = attachment.map_or(0, |a| a.data.len()),
            "gemini generate_structured"
        );
        self.send(&body).await
    }

    fn supports_media_type(&self, media_type: &str) -> bool {
        DEFAULT_MEDIA_TYPES.iter().any(|m| m.eq_ignore_ascii_case(media_type))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn from_reqwest(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout(err.to_string())
    } else if err.is_connect() || err.is_request() || err.is_body() {
        GatewayError::Communication(err.to_string())
    } else if err.is_decode() {
        GatewayError::InvalidResponse(err.to_string())
    } else {
        GatewayError::Other(err.to_string())
    }
}

fn status_error(status: u16, body: &str, model: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| preview_body(body));

    match status {
        401 | 403 => GatewayError::Authentication(message),
        400 if message.contains("API key") => GatewayError::Authentication(message),
        404 => GatewayError::ModelNotAvailable(model.to_string()),
        429 => GatewayError::RateLimitExceeded,
        _ => GatewayError::Status { status, message },
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

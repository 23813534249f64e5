//! Core QueryAnswerer implementation

use crate::config::QueryConfig;
use crate::context::serialize_corpus;
use crate::prompt::QueryPromptBuilder;
use saladoc_domain::traits::ModelGateway;
use saladoc_domain::{DocumentRecord, Locale};
use saladoc_llm::{guard, Cancellation, Guarded};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How an answer was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The model answered
    Answered,
    /// The corpus was empty; the model was not called
    NoDocuments,
    /// The model replied with nothing
    EmptyResponse,
    /// The model could not be reached, failed, or timed out
    GatewayFailed,
    /// The caller cancelled the request
    Cancelled,
    /// The serialized corpus exceeded the configured limit; the model was not called
    ContextTooLarge,
}

impl AnswerOutcome {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOutcome::Answered => "answered",
            AnswerOutcome::NoDocuments => "no_documents",
            AnswerOutcome::EmptyResponse => "empty_response",
            AnswerOutcome::GatewayFailed => "gateway_failed",
            AnswerOutcome::Cancelled => "cancelled",
            AnswerOutcome::ContextTooLarge => "context_too_large",
        }
    }

    /// Whether the text is a fixed message rather than model output
    pub fn is_fallback(&self) -> bool {
        !matches!(self, AnswerOutcome::Answered)
    }
}

impl fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text to show the user, and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Non-empty answer or fallback message
    pub text: String,
    /// How the text was produced
    pub outcome: AnswerOutcome,
}

/// Answers questions about a corpus snapshot
pub struct QueryAnswerer<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
    config: QueryConfig,
    locale: Locale,
}

impl<G> QueryAnswerer<G>
where
    G: ModelGateway + 'static,
{
    /// Create a new QueryAnswerer with the default locale
    pub fn new(gateway: G, config: QueryConfig) -> Self {
        Self::from_shared(Arc::new(gateway), config)
    }

    /// Create a QueryAnswerer over a gateway shared with other components
    pub fn from_shared(gateway: Arc<G>, config: QueryConfig) -> Self {
        Self {
            gateway,
            config,
            locale: Locale::default(),
        }
    }

    /// Set the answer language and fallback messages
    ///
    /// Blank messages are replaced by the defaults so a fallback is never empty.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        if let Err(reason) = locale.validate() {
            warn!("Incomplete locale ({}); filling blank fields with defaults", reason);
        }
        self.locale = locale.or_defaults();
        self
    }

    /// Get the locale
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Answer a question, returning only the text
    pub async fn answer(&self, question: &str, corpus: &[DocumentRecord]) -> String {
        self.respond(question, corpus).await.text
    }

    /// Answer a question, bounded by the configured timeout
    pub async fn respond(&self, question: &str, corpus: &[DocumentRecord]) -> Answer {
        self.run(question, corpus, None).await
    }

    /// Answer a question, abandoning the call if `cancel` fires
    pub async fn respond_with_cancel(
        &self,
        question: &str,
        corpus: &[DocumentRecord],
        cancel: &Cancellation,
    ) -> Answer {
        self.run(question, corpus, Some(cancel)).await
    }

    async fn run(&self, question: &str, corpus: &[DocumentRecord], cancel: Option<&Cancellation>) -> Answer {
        if corpus.is_empty() {
            info!("Query over empty corpus; skipping model call");
            return self.fallback(AnswerOutcome::NoDocuments);
        }

        let context = match serialize_corpus(corpus) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize corpus: {}", e);
                return self.fallback(AnswerOutcome::GatewayFailed);
            }
        };
        let limit = self.config.max_context_bytes;
        if limit > 0 && context.len() > limit {
            warn!("Corpus context is {} bytes (max: {})", context.len(), limit);
            return self.fallback(AnswerOutcome::ContextTooLarge);
        }

        let prompt = QueryPromptBuilder::new(&self.locale.language).build(question, &context);

        info!(
            "Answering question over {} documents ({} context bytes), model '{}'",
            corpus.len(),
            context.len(),
            self.gateway.model_name()
        );
        debug!("Prompt length: {} chars", prompt.len());
        let start = Instant::now();

        let call = self.gateway.generate_text(&prompt);
        let answer = match guard(call, self.config.answer_timeout(), cancel).await {
            Guarded::Completed(Ok(text)) if text.trim().is_empty() => {
                warn!("Model returned an empty answer");
                self.fallback(AnswerOutcome::EmptyResponse)
            }
            Guarded::Completed(Ok(text)) => Answer {
                text,
                outcome: AnswerOutcome::Answered,
            },
            Guarded::Completed(Err(e)) => {
                warn!("Query gateway call failed: {}", e);
                self.fallback(AnswerOutcome::GatewayFailed)
            }
            Guarded::TimedOut(after) => {
                warn!("Query timed out after {:?}", after);
                self.fallback(AnswerOutcome::GatewayFailed)
            }
            Guarded::Cancelled => {
                info!("Query cancelled by caller");
                self.fallback(AnswerOutcome::Cancelled)
            }
        };

        info!(
            "Query finished: {} in {} ms",
            answer.outcome,
            start.elapsed().as_millis()
        );
        answer
    }

    fn fallback(&self, outcome: AnswerOutcome) -> Answer {
        let text = match outcome {
            AnswerOutcome::NoDocuments => &self.locale.no_documents,
            AnswerOutcome::GatewayFailed => &self.locale.gateway_error,
            _ => &self.locale.empty_response,
        };
        Answer {
            text: text.clone(),
            outcome,
        }
    }
}

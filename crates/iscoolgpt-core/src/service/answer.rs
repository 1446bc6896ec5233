//! Answer service: validates an ask request, runs it through the configured
//! provider, and shapes the response.

use thiserror::Error;
use tracing::{Instrument, debug, info_span, warn};

use iscoolgpt_types::ask::{AskRequest, AskResponse};
use iscoolgpt_types::error::ValidationError;
use iscoolgpt_types::llm::{GenerationResult, LlmError, Query};

use crate::llm::box_provider::BoxLlmProvider;

/// Errors surfaced by [`AnswerService::ask`].
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Answers questions through a single provider chosen at startup.
pub struct AnswerService {
    provider: BoxLlmProvider,
}

impl AnswerService {
    pub fn new(provider: BoxLlmProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Validate `request`, generate an answer, and echo the question back.
    pub async fn ask(&self, request: &AskRequest) -> Result<AskResponse, AnswerError> {
        request.validate()?;
        let result = self.generate(&request.to_query()).await?;
        Ok(AskResponse::new(request.question.clone(), result))
    }

    /// Generate an answer for an already validated query.
    pub async fn generate(&self, query: &Query) -> Result<GenerationResult, LlmError> {
        let span = info_span!(
            "gen_ai.generate",
            gen_ai.system = self.provider.name(),
            gen_ai.request.max_tokens = ?query.max_output_tokens(),
            has_context = query.context().is_some(),
        );

        let outcome = self.provider.generate(query).instrument(span).await;
        match &outcome {
            Ok(result) => debug!(
                gen_ai.response.model = ?result.model,
                gen_ai.usage.total_tokens = ?result.tokens_used,
                "answer generated"
            ),
            Err(e) => warn!(error = %e, "answer generation failed"),
        }
        outcome
    }
}

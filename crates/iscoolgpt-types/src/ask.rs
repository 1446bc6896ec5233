//! Request/response schemas for the `POST /api/v1/ask` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::llm::{GenerationResult, Query};

/// Maximum question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 2000;

/// A question submitted by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question (1 to 2000 characters).
    pub question: String,
    /// Additional context for the answer.
    #[serde(default)]
    pub context: Option<String>,
    /// Maximum number of tokens in the answer.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl AskRequest {
    /// Check the schema constraints the core relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.question.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyQuestion);
        }
        if len > MAX_QUESTION_CHARS {
            return Err(ValidationError::QuestionTooLong {
                max: MAX_QUESTION_CHARS,
                actual: len,
            });
        }
        if self.max_tokens == Some(0) {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }

    /// Build the core query from this request.
    pub fn to_query(&self) -> Query {
        Query {
            question: self.question.clone(),
            context: self.context.clone(),
            max_output_tokens: self.max_tokens,
        }
    }
}

/// The assistant's answer, echoed with the original question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub question: String,
    pub tokens_used: Option<u32>,
    pub model: Option<String>,
}

impl AskResponse {
    pub fn new(question: impl Into<String>, result: GenerationResult) -> Self {
        Self {
            answer: result.answer,
            question: question.into(),
            tokens_used: result.tokens_used,
            model: result.model,
        }
    }
}

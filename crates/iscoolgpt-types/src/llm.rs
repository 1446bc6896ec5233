//! LLM query/result types for IsCoolGPT.
//!
//! These types model the data shapes for a single answer generation:
//! the normalized query, the normalized result, the closed set of provider
//! backends, and the error taxonomy shared by every strategy.

use std::fmt;
use std::str::FromStr;

/// A normalized question to answer.
///
/// Built once per request from an already validated [`crate::ask::AskRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub question: String,
    pub context: Option<String>,
    pub max_output_tokens: Option<u32>,
}

impl Query {
    /// Create a query with no context and no output budget.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: None,
            max_output_tokens: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// The context, if present and non-empty.
    ///
    /// An empty context string is treated the same as no context at all.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }

    /// The caller's output budget, if present and positive.
    pub fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens.filter(|n| *n > 0)
    }
}

/// Normalized answer produced by a provider strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub answer: String,
    pub tokens_used: Option<u32>,
    pub model: Option<String>,
}

/// Closed set of provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Chat-completion style remote provider.
    OpenAi,
    /// Text-generation style remote provider (Hugging Face Inference API).
    HuggingFace,
    /// Deterministic offline generator.
    Mock,
}

impl ProviderKind {
    /// Human-readable provider label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::HuggingFace => "Hugging Face",
            ProviderKind::Mock => "Mock",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::HuggingFace => write!(f, "huggingface"),
            ProviderKind::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "huggingface" => Ok(ProviderKind::HuggingFace),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(format!("invalid provider: '{other}'")),
        }
    }
}

/// Why a remote provider call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallFailure {
    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status} - {body}")]
    Status { status: u16, body: String },

    /// Connection error, timeout, malformed body, or an API error reported by the client.
    #[error("{0}")]
    Transport(String),
}

/// Errors from answer generation.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("unsupported LLM provider: '{0}'")]
    UnsupportedProvider(String),

    #[error("{} API key is not configured", .provider.label())]
    MissingCredential { provider: ProviderKind },

    #[error("error generating response with {}: {cause}", .provider.label())]
    ProviderCall {
        provider: ProviderKind,
        #[source]
        cause: CallFailure,
    },
}

impl LlmError {
    /// A non-success HTTP status returned by `provider`.
    pub fn status(provider: ProviderKind, status: u16, body: impl Into<String>) -> Self {
        LlmError::ProviderCall {
            provider,
            cause: CallFailure::Status {
                status,
                body: body.into(),
            },
        }
    }

    /// A transport-level failure talking to `provider`.
    pub fn transport(provider: ProviderKind, cause: impl fmt::Display) -> Self {
        LlmError::ProviderCall {
            provider,
            cause: CallFailure::Transport(cause.to_string()),
        }
    }

    /// Whether the error is a configuration fault detected before any network call.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            LlmError::UnsupportedProvider(_) | LlmError::MissingCredential { .. }
        )
    }
}

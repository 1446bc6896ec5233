//! LlmProvider trait definition.
//!
//! This is the core abstraction that every answer-generation strategy
//! implements. Uses native async fn in traits (RPITIT) for `generate`.

use iscoolgpt_types::llm::{GenerationResult, LlmError, Query};

/// Trait for answer-generation backends (OpenAI, Hugging Face, mock).
///
/// Implementations live in iscoolgpt-infra. A call either returns a fully
/// formed [`GenerationResult`] or exactly one [`LlmError`]; implementations
/// never retry and never return partial results.
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Generate an answer for a query.
    fn generate(
        &self,
        query: &Query,
    ) -> impl std::future::Future<Output = Result<GenerationResult, LlmError>> + Send;
}

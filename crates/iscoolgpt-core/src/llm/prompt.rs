//! Prompt assembly shared by the remote strategies.

use iscoolgpt_types::llm::Query;

/// System instruction attached to chat-completion requests.
pub const SYSTEM_PROMPT: &str = "You are an intelligent educational assistant called IsCoolGPT. \
    Answer in a clear, didactic and objective way, always focused on helping the learner.";

/// Build the text sent to a provider.
///
/// With context: `"Context: {context}\n\nQuestion: {question}"`; otherwise the bare question.
pub fn build_prompt(query: &Query) -> String {
    match query.context() {
        Some(context) => format!("Context: {context}\n\nQuestion: {}", query.question),
        None => query.question.clone(),
    }
}

/// The output budget for a call: the caller's hint, else the configured default.
pub fn resolve_max_tokens(query: &Query, default_max_tokens: u32) -> u32 {
    query.max_output_tokens().unwrap_or(default_max_tokens)
}

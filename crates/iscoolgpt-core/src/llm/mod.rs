//! LLM provider abstractions for IsCoolGPT.
//!
//! - `LlmProvider`: RPITIT trait for concrete strategies
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `prompt`: prompt assembly and token budget resolution

pub mod box_provider;
pub mod prompt;
pub mod provider;

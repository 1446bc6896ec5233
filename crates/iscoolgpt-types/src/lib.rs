//! Shared domain types for IsCoolGPT.
//!
//! This crate contains the types used across the workspace: the query and
//! result of an answer generation, the provider enumeration, the settings
//! model, the ask endpoint schemas, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod ask;
pub mod config;
pub mod error;
pub mod llm;

//! Infrastructure for IsCoolGPT: concrete provider strategies and the
//! settings loader.

pub mod config;
pub mod llm;

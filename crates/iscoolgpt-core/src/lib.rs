//! Business logic for IsCoolGPT.
//!
//! Defines the provider trait that infra strategies implement and the
//! answer service that the HTTP and CLI layers call into.

pub mod llm;
pub mod service;

//! HTTP/REST API layer for IsCoolGPT.
//!
//! Axum-based REST API with the question endpoint under `/api/v1/`,
//! plus root and health probes.

pub mod error;
pub mod handlers;
pub mod router;

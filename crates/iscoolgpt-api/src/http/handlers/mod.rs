//! REST API request handlers.

pub mod ask;

//! Services called by the HTTP and CLI layers.

pub mod answer;

//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Text generation (Hugging Face Inference API)
//! - Prompt loading (plain-text files)
//! - HTTP API (axum router, controllers, rate limiting)

pub mod adapter;
pub mod api;

pub use adapter::*;

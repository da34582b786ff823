//! # Domain Layer
//!
//! Chat models, validation rules, and prompt assembly.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;

//! # Application Layer
//!
//! Use cases and the interfaces they depend on. Connectors implement the
//! interfaces; the HTTP and CLI entry points drive the use cases.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;

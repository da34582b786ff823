pub mod application;
pub mod cli;
pub mod config;
pub mod connector;
pub mod domain;
pub mod telemetry;

pub use application::{ChatUseCase, PromptSource, TextGenerator};

pub use cli::Commands;

pub use config::AppConfig;

pub use connector::api::{build_router, serve, shutdown_signal, Container, RateLimit, RateLimiter};
pub use connector::{FilePromptSource, HuggingFaceClient, RetryPolicy};

pub use domain::{
    BlockedTermsPolicy, ChatReply, ChatRequest, Completion, ContentPolicy, DomainError,
    InferenceError, InferenceOutcome, InputValidator, PromptSections, ValidationError,
};

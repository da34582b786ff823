use thiserror::Error;

/// Text produced by the upstream model for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    text: String,
    token_count: usize,
}

impl Completion {
    /// Build a completion, estimating the token count from the number of
    /// whitespace-separated words.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let token_count = text.split_whitespace().count();
        Self { text, token_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// Terminal failure of one inference attempt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("Invalid response format from API")]
    InvalidResponseFormat,

    #[error("Max retries exceeded")]
    MaxRetriesExceeded,

    #[error("API request failed with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Outcome of [`crate::application::TextGenerator::generate`].
pub type InferenceOutcome = Result<Completion, InferenceError>;

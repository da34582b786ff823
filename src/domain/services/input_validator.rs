use std::sync::Arc;

use tracing::debug;

use super::content_policy::{BlockedTermsPolicy, ContentPolicy};
use crate::domain::ValidationError;

pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Checks inbound chat messages and cleans up model output.
#[derive(Clone)]
pub struct InputValidator {
    max_length: usize,
    policy: Arc<dyn ContentPolicy>,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_LENGTH)
    }
}

impl InputValidator {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            policy: Arc::new(BlockedTermsPolicy::default()),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn ContentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validate a message and return it trimmed.
    ///
    /// `None` stands for a missing or non-string message. Length is counted in
    /// characters after trimming.
    pub fn validate<'a>(&self, message: Option<&'a str>) -> Result<&'a str, ValidationError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ValidationError::EmptyMessage),
        };

        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::WhitespaceOnly);
        }

        let length = trimmed.chars().count();
        if length > self.max_length {
            debug!("Message rejected: {} chars > {}", length, self.max_length);
            return Err(ValidationError::TooLong {
                max: self.max_length,
            });
        }

        if !self.policy.permits(trimmed) {
            return Err(ValidationError::ProhibitedContent);
        }

        Ok(trimmed)
    }

    /// Collapse runs of three or more newlines to a single blank line and trim.
    ///
    /// Output is plain text; no escaping is applied.
    pub fn sanitize(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut newlines = 0usize;

        for ch in text.chars() {
            if ch == '\n' {
                newlines += 1;
                if newlines <= 2 {
                    out.push(ch);
                }
            } else {
                newlines = 0;
                out.push(ch);
            }
        }

        out.trim().to_string()
    }
}

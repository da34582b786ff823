use thiserror::Error;

/// Reasons a chat message is rejected before reaching the model.
///
/// The display strings are returned verbatim to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message contains only whitespace")]
    WhitespaceOnly,

    #[error("Message exceeds maximum length of {max} characters")]
    TooLong { max: usize },

    #[error("Message contains prohibited content")]
    ProhibitedContent,
}

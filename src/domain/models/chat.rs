use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/chat`.
///
/// `message` is kept as a raw JSON value so that a missing or non-string
/// message is reported as a validation failure instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<Value>,
}

impl ChatRequest {
    /// The message text, or `None` when it is absent or not a string.
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }
}

/// A sanitized assistant reply produced for one chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    response: String,
    tokens_used: usize,
}

impl ChatReply {
    pub fn new(response: impl Into<String>, tokens_used: usize) -> Self {
        Self {
            response: response.into(),
            tokens_used,
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn tokens_used(&self) -> usize {
        self.tokens_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_message_is_exposed() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(req.message(), Some("hello"));
    }

    #[test]
    fn missing_or_non_string_message_is_none() {
        let missing: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.message(), None);

        let number: ChatRequest = serde_json::from_str(r#"{"message": 42}"#).unwrap();
        assert_eq!(number.message(), None);

        let null: ChatRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert_eq!(null.message(), None);
    }
}

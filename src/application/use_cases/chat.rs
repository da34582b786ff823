use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::TextGenerator;
use crate::domain::{ChatReply, DomainError, InputValidator, PromptSections};

/// Runs one chat turn: validate, assemble, generate, sanitize.
pub struct ChatUseCase {
    validator: InputValidator,
    prompts: PromptSections,
    generator: Arc<dyn TextGenerator>,
}

impl ChatUseCase {
    pub fn new(
        validator: InputValidator,
        prompts: PromptSections,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            validator,
            prompts,
            generator,
        }
    }

    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }

    /// Answer `message`.
    ///
    /// Validation failures return before the generator is contacted.
    pub async fn execute(&self, message: Option<&str>) -> Result<ChatReply, DomainError> {
        let message = match self.validator.validate(message) {
            Ok(m) => m,
            Err(e) => {
                warn!("Invalid input: {}", e);
                return Err(e.into());
            }
        };

        let prompt = self.prompts.assemble(message);
        info!("Processing message: {}...", preview(message, 50));

        let completion = match self.generator.generate(&prompt).await {
            Ok(c) => c,
            Err(e) => {
                error!("API call failed ({}): {}", self.generator.model_name(), e);
                return Err(e.into());
            }
        };

        let tokens_used = completion.token_count();
        let response = InputValidator::sanitize(completion.text());
        Ok(ChatReply::new(response, tokens_used))
    }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{Completion, InferenceError, InferenceOutcome, ValidationError};

    struct StubGenerator {
        reply: InferenceOutcome,
        calls: AtomicUsize,
        last_prompt: std::sync::Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn new(reply: InferenceOutcome) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> InferenceOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn use_case(generator: Arc<StubGenerator>, max_len: usize) -> ChatUseCase {
        ChatUseCase::new(
            InputValidator::new(max_len),
            PromptSections::new("SYS", "STYLE", "SAFE"),
            generator,
        )
    }

    #[tokio::test]
    async fn successful_turn_is_sanitized() {
        let gen = Arc::new(StubGenerator::new(Ok(Completion::new(
            "  Hello\n\n\n\nworld  ",
        ))));
        let reply = use_case(gen.clone(), 100)
            .execute(Some("  hi  "))
            .await
            .expect("reply");

        assert_eq!(reply.response(), "Hello\n\nworld");
        assert_eq!(reply.tokens_used(), 2);
        assert_eq!(
            gen.last_prompt.lock().unwrap().as_deref(),
            Some("SYS\n\nSTYLE\n\nSAFE\n\nCurrent conversation:\nUser: hi\nAssistant:")
        );
    }

    #[tokio::test]
    async fn overlong_message_never_reaches_generator() {
        let gen = Arc::new(StubGenerator::new(Ok(Completion::new("unused"))));
        let err = use_case(gen.clone(), 3)
            .execute(Some("too long"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::TooLong { max: 3 })
        ));
        assert_eq!(gen.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generator_failure_is_propagated() {
        let gen = Arc::new(StubGenerator::new(Err(InferenceError::Timeout)));
        let err = use_case(gen, 100).execute(Some("hi")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Inference(InferenceError::Timeout)
        ));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("hi", 50), "hi");
    }
}

use async_trait::async_trait;

use crate::domain::InferenceOutcome;

/// Turns one prompt into one completion.
///
/// Implementors own transport, retries, and vendor payload details. Whatever
/// happens upstream is reported as a single terminal outcome.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> InferenceOutcome;

    /// Identifier of the model behind this generator, for logging.
    fn model_name(&self) -> &str;
}

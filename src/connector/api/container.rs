use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::{ChatUseCase, PromptSource, TextGenerator};
use crate::config::AppConfig;
use crate::connector::adapter::{FilePromptSource, HuggingFaceClient, RetryPolicy};
use crate::domain::{BlockedTermsPolicy, InputValidator};

use super::rate_limit::{RateLimit, RateLimiter};

/// Services assembled once at startup and shared by every request.
pub struct Container {
    config: AppConfig,
    chat_use_case: Arc<ChatUseCase>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl Container {
    /// Wire the production services described by `config`.
    pub fn new(config: AppConfig) -> Result<Self> {
        let retry = RetryPolicy::default().with_max_retries(config.security.max_retries);
        let generator = Arc::new(HuggingFaceClient::new(&config.huggingface, retry)?);
        info!(
            "Using Hugging Face model {} at {} ({} retries)",
            generator.model_name(),
            generator.url(),
            retry.max_retries
        );

        let prompt_source = FilePromptSource::new(config.prompts_base_dir(), &config.prompts);
        Self::from_parts(config, &prompt_source, generator)
    }

    /// Wire the container around caller-supplied prompt and generation services.
    pub fn from_parts(
        config: AppConfig,
        prompt_source: &dyn PromptSource,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        let policy = BlockedTermsPolicy::new(&config.security.blocked_terms);
        if !policy.is_empty() {
            debug!("Blocking {} configured terms", policy.len());
        }
        let validator = InputValidator::new(config.security.max_input_length)
            .with_policy(Arc::new(policy));

        let prompts = prompt_source.load();
        let chat_use_case = Arc::new(ChatUseCase::new(validator, prompts, generator));

        let rate_limiter = if config.rate_limiting.enabled {
            let limit = RateLimit::parse(&config.rate_limiting.default)?;
            debug!(
                "Rate limiting chat to {} requests per {:?}",
                limit.requests(),
                limit.window()
            );
            Some(Arc::new(RateLimiter::new(limit)))
        } else {
            None
        };

        Ok(Self {
            config,
            chat_use_case,
            rate_limiter,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn chat_use_case(&self) -> Arc<ChatUseCase> {
        Arc::clone(&self.chat_use_case)
    }

    pub fn rate_limiter(&self) -> Option<Arc<RateLimiter>> {
        self.rate_limiter.clone()
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::application::TextGenerator;
use crate::config::HuggingFaceConfig;
use crate::domain::{Completion, DomainError, InferenceError, InferenceOutcome};

/// Wait applied after a 503, while the upstream loads a cold model.
pub const COLD_MODEL_DELAY: Duration = Duration::from_secs(10);
/// Wait applied after a request timeout before trying again.
pub const TIMEOUT_RETRY_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Bounds and delays for [`HuggingFaceClient`]'s retry loop.
///
/// Only two conditions are retried: 503 (cold model) and request timeouts.
/// Every other failure is terminal on the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub cold_model_delay: Duration,
    pub timeout_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            cold_model_delay: COLD_MODEL_DELAY,
            timeout_delay: TIMEOUT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Hugging Face Inference API request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: Options,
}

#[derive(Serialize)]
struct Parameters {
    max_length: u32,
    temperature: f64,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Serialize)]
struct Options {
    use_cache: bool,
    wait_for_model: bool,
}

/// Result of a single HTTP exchange, before retry decisions.
enum Attempt {
    Done(InferenceOutcome),
    ColdModel,
    TimedOut,
}

/// Text-generation client for the Hugging Face Inference API.
///
/// Implements [`TextGenerator`] so the chat use case never sees transport
/// details. Upstream instability is absorbed here: 503 responses wait out a
/// cold model, timeouts get a short pause, and everything else fails fast.
///
/// Safe to share across tasks; no state is mutated per request.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + model).
    url: String,
    max_length: u32,
    temperature: f64,
    retry: RetryPolicy,
}

impl HuggingFaceClient {
    pub fn new(config: &HuggingFaceConfig, retry: RetryPolicy) -> Result<Self, DomainError> {
        if config.api_key.is_empty() {
            warn!("HUGGINGFACE_API_KEY not set. API calls will fail.");
        }

        Ok(Self {
            client: build_http_client(config.timeout())?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            url: config.endpoint(),
            max_length: config.max_length,
            temperature: config.temperature,
            retry,
        })
    }

    /// Replace the per-request timeout taken from the configuration.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, DomainError> {
        self.client = build_http_client(timeout)?;
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn attempt(&self, request: &ApiRequest<'_>) -> Attempt {
        let response = match self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Attempt::TimedOut,
            Err(e) => {
                error!("Request exception: {e}");
                return Attempt::Done(Err(InferenceError::Connection(e.to_string())));
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => match response.bytes().await {
                Ok(body) => Attempt::Done(parse_completion(&body)),
                Err(e) if e.is_timeout() => Attempt::TimedOut,
                Err(e) => {
                    error!("Failed to read response body: {e}");
                    Attempt::Done(Err(InferenceError::Connection(e.to_string())))
                }
            },
            StatusCode::SERVICE_UNAVAILABLE => Attempt::ColdModel,
            _ => {
                let body = response.text().await.unwrap_or_default();
                error!("API error: {status} - {body}");
                Attempt::Done(Err(InferenceError::UpstreamStatus {
                    status: status.as_u16(),
                }))
            }
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> InferenceOutcome {
        let request = ApiRequest {
            inputs: prompt,
            parameters: Parameters {
                max_length: self.max_length,
                temperature: self.temperature,
                do_sample: true,
                return_full_text: false,
            },
            options: Options {
                use_cache: true,
                wait_for_model: true,
            },
        };

        let max_retries = self.retry.max_retries;
        for attempt in 1..=max_retries {
            let attempts_left = attempt < max_retries;
            info!("Sending request to Hugging Face API (attempt {attempt})");

            match self.attempt(&request).await {
                Attempt::Done(outcome) => return outcome,
                Attempt::ColdModel => {
                    if attempts_left {
                        warn!(
                            "Model loading, waiting {}s (attempt {attempt})",
                            self.retry.cold_model_delay.as_secs_f32()
                        );
                        tokio::time::sleep(self.retry.cold_model_delay).await;
                    } else {
                        warn!("Model still loading on final attempt {attempt}");
                    }
                }
                Attempt::TimedOut => {
                    error!("Request timeout (attempt {attempt})");
                    if !attempts_left {
                        return Err(InferenceError::Timeout);
                    }
                    tokio::time::sleep(self.retry.timeout_delay).await;
                }
            }
        }

        warn!("Giving up after {max_retries} attempts");
        Err(InferenceError::MaxRetriesExceeded)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))
}

/// Extract the completion from a 200 body of the form `[{"generated_text": ...}]`.
fn parse_completion(body: &[u8]) -> InferenceOutcome {
    let parsed: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Response body is not JSON: {e}");
        InferenceError::InvalidResponseFormat
    })?;

    let text = parsed
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("generated_text"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            warn!("Unexpected response shape: {parsed}");
            InferenceError::InvalidResponseFormat
        })?;

    debug!("Generated {} chars", text.len());
    Ok(Completion::new(text))
}

use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const HEALTHY: &str = "healthy";
pub const SCOPE: &str = "General conversational assistance only";

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: &'static str,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    pub tokens_used: usize,
}

/// Error envelope used by the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

/// Error envelope for routing-level failures (404, 429), carrying the HTTP code.
#[derive(Debug, Serialize)]
pub struct StatusCodeResponse {
    pub error: &'static str,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct PublicConfigResponse {
    pub app_name: String,
    pub version: String,
    pub max_input_length: usize,
    pub scope: &'static str,
}

/// Round a duration in seconds to two decimals for display.
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_secs_keeps_two_decimals() {
        assert_eq!(round_secs(1.23456), 1.23);
        assert_eq!(round_secs(0.005), 0.01);
        assert_eq!(round_secs(0.0), 0.0);
    }

    #[test]
    fn processing_time_is_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse {
            error: "bad".to_string(),
            status: STATUS_ERROR,
            processing_time: None,
        })
        .expect("serialize");
        assert!(body.get("processing_time").is_none());
        assert_eq!(body["status"], "error");
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::models::{ErrorResponse, StatusCodeResponse, STATUS_ERROR};

pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "I'm experiencing technical difficulties. Please try again shortly.";
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const NOT_JSON_MESSAGE: &str = "Request must be JSON";
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Every non-success response the HTTP API produces.
///
/// Upstream and unexpected failures carry no detail: callers only ever see a
/// generic message, the cause is logged where the error is raised.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream { processing_time: f64 },
    Unexpected,
    NotFound,
    RateLimited,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error,
                    status: STATUS_ERROR,
                    processing_time: None,
                }),
            )
                .into_response(),
            ApiError::Upstream { processing_time } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                    status: STATUS_ERROR,
                    processing_time: Some(processing_time),
                }),
            )
                .into_response(),
            ApiError::Unexpected => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: UNEXPECTED_FAILURE_MESSAGE.to_string(),
                    status: STATUS_ERROR,
                    processing_time: None,
                }),
            )
                .into_response(),
            ApiError::NotFound => status_code_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ApiError::RateLimited => {
                status_code_response(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
            }
        }
    }
}

fn status_code_response(code: StatusCode, error: &'static str) -> Response {
    (
        code,
        Json(StatusCodeResponse {
            error,
            status: code.as_u16(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream { processing_time: 1.0 }
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unexpected.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::RateLimited.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}

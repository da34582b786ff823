use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{error, info, warn};

use crate::connector::api::error::{ApiError, NOT_JSON_MESSAGE};
use crate::connector::api::models::{round_secs, ChatResponse, STATUS_SUCCESS};
use crate::connector::api::Container;
use crate::domain::{ChatRequest, DomainError};

/// `POST /api/chat`
pub async fn chat(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let start = Instant::now();

    let Json(request) = payload.map_err(|e| {
        warn!("Rejected chat request body: {e}");
        ApiError::BadRequest(NOT_JSON_MESSAGE.to_string())
    })?;

    let result = container.chat_use_case().execute(request.message()).await;
    let processing_time = round_secs(start.elapsed().as_secs_f64());

    match result {
        Ok(reply) => {
            info!("Request processed in {processing_time:.2}s");
            Ok(Json(ChatResponse {
                tokens_used: reply.tokens_used(),
                response: reply.response().to_string(),
                status: STATUS_SUCCESS,
                processing_time,
            }))
        }
        Err(DomainError::Validation(e)) => Err(ApiError::BadRequest(e.to_string())),
        Err(DomainError::Inference(_)) => Err(ApiError::Upstream { processing_time }),
        Err(e) => {
            error!("Unexpected error in chat endpoint: {e:?}");
            Err(ApiError::Unexpected)
        }
    }
}

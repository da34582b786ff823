use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::connector::api::models::{HealthResponse, HEALTHY};
use crate::connector::api::{ApiError, Container};

pub async fn health(State(container): State<Arc<Container>>) -> Json<HealthResponse> {
    let app = &container.config().app;
    Json(HealthResponse {
        status: HEALTHY,
        service: app.name.clone(),
        version: app.version.clone(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

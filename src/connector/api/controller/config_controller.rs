use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::connector::api::models::{PublicConfigResponse, SCOPE};
use crate::connector::api::Container;

/// `GET /api/config`: non-sensitive settings for the frontend.
pub async fn public_config(State(container): State<Arc<Container>>) -> Json<PublicConfigResponse> {
    let config = container.config();
    Json(PublicConfigResponse {
        app_name: config.app.name.clone(),
        version: config.app.version.clone(),
        max_input_length: container.chat_use_case().validator().max_length(),
        scope: SCOPE,
    })
}

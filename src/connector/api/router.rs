use std::any::Any;
use std::sync::Arc;

use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::container::Container;
use super::controller::{chat, health, not_found, public_config};
use super::error::ApiError;
use super::rate_limit::enforce_rate_limit;

/// Build the HTTP surface. Only the chat endpoint is rate limited.
pub fn build_router(container: Arc<Container>) -> Router {
    let mut chat_routes = Router::new().route("/api/chat", post(chat));
    if let Some(limiter) = container.rate_limiter() {
        chat_routes =
            chat_routes.route_layer(middleware::from_fn_with_state(limiter, enforce_rate_limit));
    }

    Router::new()
        .route("/api/health", get(health))
        .route("/api/config", get(public_config))
        .merge(chat_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

/// A panicking handler still answers with the generic 500 envelope.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {detail}");
    ApiError::Unexpected.into_response()
}

//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// Request bodies are capped at `server.max_body_size_bytes`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_bytes;

    Router::new()
        .route("/api/v1/health", get(handlers::health::health_check))
        // WhatsApp webhook
        .route(
            "/api/v1/hook",
            get(handlers::webhook::verify_webhook).post(handlers::webhook::handle_webhook),
        )
        // Document hosting
        .route(
            "/api/v1/{number}/document",
            get(handlers::documents::get_document).post(handlers::documents::upload_document),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

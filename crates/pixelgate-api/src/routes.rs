//! Route configuration

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn setup_routes(state: AppState) -> Router {
    let body_limit = state.config.max_body_size_bytes;
    tracing::info!(max_body_size_bytes = body_limit, "Request body limit set");

    Router::new()
        .route("/health", get(handlers::health))
        .route("/operations", get(handlers::list_operations))
        .route("/{operation}", post(handlers::run_operation))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

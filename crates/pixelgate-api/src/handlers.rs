//! Request handlers

use crate::error::{invalid_options, HttpError};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use pixelgate_core::ImageOptions;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct OperationsResponse {
    pub operations: Vec<&'static str>,
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn list_operations(State(state): State<AppState>) -> impl IntoResponse {
    Json(OperationsResponse {
        operations: state.registry.names(),
    })
}

/// `POST /{operation}`: image in the body, options in the query string
pub async fn run_operation(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    query: Result<Query<ImageOptions>, QueryRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let fail = |error| HttpError::new(error, &state.config);
    let Query(opts) = query.map_err(|rejection| fail(invalid_options(rejection)))?;
    tracing::debug!(operation = %operation, body_size = body.len(), "Operation requested");

    let output = state
        .registry
        .run(&operation, body, &opts)
        .await
        .map_err(fail)?;

    Ok(([(header::CONTENT_TYPE, output.mime)], output.body))
}

//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpError>`. `HttpError` wraps an
//! `OperationError` and renders it as JSON with the status, code and
//! retry hints taken from its `ErrorMetadata`. Whether details are shown
//! is decided by the loaded `Config`.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixelgate_core::{Config, ErrorMetadata, LogLevel, OperationError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper so `IntoResponse` can be implemented for the core error type
#[derive(Debug)]
pub struct HttpError {
    pub error: OperationError,
    /// Hide `details` and `error_type` from the client
    pub production: bool,
}

impl HttpError {
    pub fn new(error: OperationError, config: &Config) -> Self {
        HttpError {
            error,
            production: config.is_production(),
        }
    }
}

/// Malformed query strings are caller errors like any other bad option
pub fn invalid_options(rejection: QueryRejection) -> OperationError {
    OperationError::InvalidArgument(format!("Invalid options: {}", rejection.body_text()))
}

fn log_error(error: &OperationError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let error = &self.error;
        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(error);

        let show_details = !self.production && !error.is_sensitive();
        let body = Json(ErrorResponse {
            error: error.client_message(),
            details: show_details.then(|| error.to_string()),
            error_type: show_details.then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        });

        (status, body).into_response()
    }
}

//! Error types module
//!
//! Every image operation either returns its output or exactly one
//! `OperationError`. The variants mirror the failure stages of a call:
//! argument validation, the transformation engine, an abnormal engine
//! termination, persistence, and deadline expiry.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like bad image data
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// to whatever surface (HTTP, CLI) sits in front of the operations.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_ARGUMENT")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// A required option is missing or a supplied value is unsupported.
    /// Always raised before the engine is invoked.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine returned an ordinary error (corrupt data, impossible geometry).
    #[error("Image processing failed: {0}")]
    EngineFailure(String),

    /// The engine terminated abnormally and the failure was recovered.
    #[error("Internal processing error: {0}")]
    InternalFailure(String),

    /// The transformed image could not be persisted.
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// The engine or storage call exceeded its deadline.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Result type for image operations
pub type OperationResult<T> = Result<T, OperationError>;

impl OperationError {
    /// Shorthand for the most common validation failure
    pub fn missing_param(names: &str) -> Self {
        OperationError::InvalidArgument(format!("Missing required param: {}", names))
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            OperationError::InvalidArgument(_) => "InvalidArgument",
            OperationError::EngineFailure(_) => "EngineFailure",
            OperationError::InternalFailure(_) => "InternalFailure",
            OperationError::StorageFailure(_) => "StorageFailure",
            OperationError::Timeout(_) => "Timeout",
        }
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        OperationError::InternalFailure(format!("JSON serialization error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn static_metadata(
    err: &OperationError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        OperationError::InvalidArgument(_) => (
            400,
            "INVALID_ARGUMENT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        OperationError::EngineFailure(_) => (
            422,
            "IMAGE_PROCESSING_ERROR",
            false,
            Some("Check image format and try a different file"),
            false,
            LogLevel::Warn,
        ),
        OperationError::InternalFailure(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        OperationError::StorageFailure(_) => (
            502,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        OperationError::Timeout(_) => (
            504,
            "TIMEOUT",
            true,
            Some("Retry with a smaller image"),
            false,
            LogLevel::Warn,
        ),
    }
}

impl ErrorMetadata for OperationError {
    fn http_status_code(&self) -> u16 {
        static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            OperationError::InvalidArgument(ref msg) => msg.clone(),
            OperationError::EngineFailure(ref msg) => msg.clone(),
            OperationError::InternalFailure(_) => "Internal image processing error".to_string(),
            OperationError::StorageFailure(_) => "Failed to persist image".to_string(),
            OperationError::Timeout(ref msg) => format!("Operation timed out: {}", msg),
        }
    }
}

//! Pixelgate Core Library
//!
//! This crate provides the request options model, error types, configuration
//! and shared enums used by every Pixelgate component.

pub mod config;
pub mod constants;
pub mod error;
pub mod options;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorMetadata, LogLevel, OperationError, OperationResult};
pub use options::{Gravity, ImageOptions};
pub use storage_types::StorageBackend;

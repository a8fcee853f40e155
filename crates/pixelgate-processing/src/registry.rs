//! Operation registry
//!
//! Maps each `Operation` to its entry point. Built once at startup and shared
//! by handle with whatever surface receives requests.

use crate::executor::Executor;
use crate::operation::Operation;
use crate::operations;
use crate::output::ImageOutput;
use bytes::Bytes;
use pixelgate_core::{ErrorMetadata, ImageOptions, LogLevel, OperationError, OperationResult};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

pub type OperationFuture<'a> =
    Pin<Box<dyn Future<Output = OperationResult<ImageOutput>> + Send + 'a>>;

/// Validation plus dispatch for one operation
pub type OperationFn = for<'a> fn(&'a Executor, Bytes, &'a ImageOptions) -> OperationFuture<'a>;

macro_rules! entry {
    ($name:ident) => {{
        fn call<'a>(
            executor: &'a Executor,
            buf: Bytes,
            opts: &'a ImageOptions,
        ) -> OperationFuture<'a> {
            Box::pin(operations::$name(executor, buf, opts))
        }
        call as OperationFn
    }};
}

fn entry_for(operation: Operation) -> OperationFn {
    match operation {
        Operation::Info => entry!(info),
        Operation::Resize => entry!(resize),
        Operation::Enlarge => entry!(enlarge),
        Operation::Extract => entry!(extract),
        Operation::Crop => entry!(crop),
        Operation::Rotate => entry!(rotate),
        Operation::Flip => entry!(flip),
        Operation::Flop => entry!(flop),
        Operation::Thumbnail => entry!(thumbnail),
        Operation::Zoom => entry!(zoom),
        Operation::Convert => entry!(convert),
        Operation::Watermark => entry!(watermark),
    }
}

pub struct OperationRegistry {
    executor: Arc<Executor>,
    operations: HashMap<Operation, OperationFn>,
}

impl OperationRegistry {
    pub fn new(executor: Arc<Executor>) -> Self {
        let operations = Operation::ALL
            .into_iter()
            .map(|operation| (operation, entry_for(operation)))
            .collect();
        Self {
            executor,
            operations,
        }
    }

    /// Registered operation names
    pub fn names(&self) -> Vec<&'static str> {
        Operation::ALL
            .into_iter()
            .filter(|operation| self.operations.contains_key(operation))
            .map(Operation::as_str)
            .collect()
    }

    /// Run the operation called `name`
    pub async fn run(
        &self,
        name: &str,
        buf: Bytes,
        opts: &ImageOptions,
    ) -> OperationResult<ImageOutput> {
        let operation: Operation = name.parse()?;
        self.dispatch(operation, buf, opts).await
    }

    pub async fn dispatch(
        &self,
        operation: Operation,
        buf: Bytes,
        opts: &ImageOptions,
    ) -> OperationResult<ImageOutput> {
        let handler = self.operations.get(&operation).ok_or_else(|| {
            OperationError::InvalidArgument(format!("Operation not registered: {}", operation))
        })?;

        let start = Instant::now();
        let result = handler(&self.executor, buf, opts).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(output) => tracing::info!(
                operation = %operation,
                output_size = output.body.len(),
                mime = %output.mime,
                duration_ms = duration_ms,
                "Operation completed"
            ),
            Err(e) => log_failure(operation, e, duration_ms),
        }
        result
    }
}

fn log_failure(operation: Operation, error: &OperationError, duration_ms: u64) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(
            operation = %operation,
            error = %error,
            duration_ms = duration_ms,
            "Operation rejected"
        ),
        LogLevel::Warn => tracing::warn!(
            operation = %operation,
            error = %error,
            duration_ms = duration_ms,
            "Operation failed"
        ),
        LogLevel::Error => tracing::error!(
            operation = %operation,
            error = %error,
            error_type = error.error_type(),
            duration_ms = duration_ms,
            "Operation failed"
        ),
    }
}

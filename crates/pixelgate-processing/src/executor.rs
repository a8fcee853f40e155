//! Execution boundary
//!
//! Runs engine calls on tokio's blocking pool so a CPU-bound transform never
//! stalls the async runtime, and so a panicking engine unwinds into a
//! `JoinError` instead of taking the process down. After a successful
//! transform the output is optionally uploaded to storage.
//!
//! A deadline, when configured, bounds the engine call and the upload
//! separately. An engine call that outlives its deadline keeps running on
//! the blocking pool until it finishes; its result is discarded.

use crate::descriptor::TransformDescriptor;
use crate::engine::{Engine, EngineError, ImageInfo};
use crate::format::content_type;
use crate::output::ImageOutput;
use crate::persistence::PersistenceDirective;
use bytes::Bytes;
use pixelgate_core::{OperationError, OperationResult};
use pixelgate_storage::Storage;
use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinError;

/// Message used when a panic payload carries no readable text
pub const GENERIC_INTERNAL_ERROR: &str = "internal image processing error";

pub struct Executor {
    engine: Arc<dyn Engine>,
    storage: Option<Arc<dyn Storage>>,
    deadline: Option<Duration>,
}

impl Executor {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self {
            engine,
            storage: None,
            deadline: None,
        }
    }

    pub fn with_storage(mut self, storage: Option<Arc<dyn Storage>>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Transform `buf` according to `descriptor`, then persist the output if
    /// a directive is given.
    pub async fn execute(
        &self,
        buf: Bytes,
        descriptor: TransformDescriptor,
        directive: Option<PersistenceDirective>,
    ) -> OperationResult<ImageOutput> {
        let input_size = buf.len();
        let start = Instant::now();

        let output = self
            .guarded("transform", move |engine| engine.transform(&buf, &descriptor))
            .await?
            .map_err(engine_failure)?;
        let body = Bytes::from(output);

        tracing::debug!(
            input_size = input_size,
            output_size = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Engine transform completed"
        );

        let mime = content_type(self.engine.detect_type(&body));
        if let Some(directive) = directive {
            self.persist(&directive, body.clone(), mime).await?;
        }

        Ok(ImageOutput::new(body, mime))
    }

    /// Read image metadata inside the same guard as transforms
    pub async fn metadata(&self, buf: Bytes) -> OperationResult<ImageInfo> {
        self.guarded("metadata", move |engine| engine.metadata(&buf))
            .await?
            .map_err(engine_failure)
    }

    /// Run `f` against the engine on the blocking pool, recovering panics and
    /// enforcing the deadline. The inner `Result` is the engine's own outcome.
    async fn guarded<T, F>(
        &self,
        stage: &'static str,
        f: F,
    ) -> OperationResult<Result<T, EngineError>>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Engine) -> Result<T, EngineError> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let task = tokio::task::spawn_blocking(move || f(engine.as_ref()));

        let joined = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, task).await.map_err(|_| {
                tracing::warn!(
                    stage = stage,
                    deadline_ms = deadline.as_millis() as u64,
                    "Engine call timed out"
                );
                OperationError::Timeout(format!("{} exceeded {}ms", stage, deadline.as_millis()))
            })?,
            None => task.await,
        };

        joined.map_err(|e| {
            let error = recover_join_error(e);
            tracing::error!(stage = stage, error = %error, "Engine terminated abnormally");
            error
        })
    }

    async fn persist(
        &self,
        directive: &PersistenceDirective,
        body: Bytes,
        content_type: &str,
    ) -> OperationResult<()> {
        let storage = self.storage.as_ref().ok_or_else(|| {
            OperationError::StorageFailure("no storage backend is configured".to_string())
        })?;

        let size = body.len();
        let start = Instant::now();
        let upload = storage.upload(&directive.bucket, &directive.object_name, body, content_type);

        let result = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, upload).await.map_err(|_| {
                OperationError::Timeout(format!("upload exceeded {}ms", deadline.as_millis()))
            })?,
            None => upload.await,
        };

        match result {
            Ok(url) => {
                tracing::info!(
                    bucket = %directive.bucket,
                    object_name = %directive.object_name,
                    content_type = content_type,
                    size = size,
                    url = %url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Persisted transformed image"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    bucket = %directive.bucket,
                    object_name = %directive.object_name,
                    error = %e,
                    "Failed to persist transformed image"
                );
                Err(OperationError::StorageFailure(e.to_string()))
            }
        }
    }
}

fn engine_failure(err: EngineError) -> OperationError {
    OperationError::EngineFailure(err.to_string())
}

fn recover_join_error(err: JoinError) -> OperationError {
    if err.is_panic() {
        recover_panic(err.into_panic())
    } else {
        OperationError::InternalFailure("engine task was cancelled".to_string())
    }
}

/// Turn a panic payload into a returned error. Errors are forwarded as-is;
/// text payloads keep their message.
pub fn recover_panic(payload: Box<dyn Any + Send>) -> OperationError {
    let payload = match payload.downcast::<OperationError>() {
        Ok(error) => return *error,
        Err(other) => other,
    };
    let payload = match payload.downcast::<EngineError>() {
        Ok(error) => return engine_failure(*error),
        Err(other) => other,
    };
    if let Some(message) = payload.downcast_ref::<&str>() {
        return OperationError::InternalFailure(message.to_string());
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return OperationError::InternalFailure(message.clone());
    }
    OperationError::InternalFailure(GENERIC_INTERNAL_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_panic_payloads() {
        assert_eq!(
            recover_panic(Box::new("boom")),
            OperationError::InternalFailure("boom".to_string())
        );
        assert_eq!(
            recover_panic(Box::new(String::from("bad header"))),
            OperationError::InternalFailure("bad header".to_string())
        );
        assert_eq!(
            recover_panic(Box::new(42_u32)),
            OperationError::InternalFailure(GENERIC_INTERNAL_ERROR.to_string())
        );
        assert_eq!(
            recover_panic(Box::new(OperationError::Timeout("t".to_string()))),
            OperationError::Timeout("t".to_string())
        );
        assert!(matches!(
            recover_panic(Box::new(EngineError::UnsupportedType)),
            OperationError::EngineFailure(_)
        ));
    }
}

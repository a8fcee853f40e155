#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use pixelgate_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration.
///
/// Returns `Ok(None)` when no backend is configured; persistence requests
/// then fail with a storage error instead of the whole service refusing to start.
pub async fn create_storage(config: &Config) -> StorageResult<Option<Arc<dyn Storage>>> {
    let backend = match config.storage_backend() {
        Some(backend) => backend,
        None => {
            tracing::info!("No storage backend configured, persistence disabled");
            return Ok(None);
        }
    };

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            tracing::info!(region = %region, endpoint = ?endpoint, "Using S3 storage backend");
            let storage: Arc<dyn Storage> = Arc::new(S3Storage::new(region, endpoint));
            Ok(Some(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .unwrap_or_else(|| format!("file://{}", base_path));

            tracing::info!(base_path = %base_path, "Using local storage backend");
            let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(base_path, base_url).await?);
            Ok(Some(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

use crate::keys::{validate_bucket, validate_object_key};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Buckets are directories below `base_path`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/pixelgate")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8088/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a destination to a filesystem path inside `base_path`
    fn object_path(&self, bucket: &str, object_name: &str) -> StorageResult<PathBuf> {
        validate_bucket(bucket)?;
        validate_object_key(object_name)?;
        Ok(self.base_path.join(bucket).join(object_name))
    }

    /// Generate public URL for file
    fn generate_url(&self, bucket: &str, object_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            bucket,
            object_name
        )
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        let path = self.object_path(bucket, object_name)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload successful"
        );

        Ok(self.generate_url(bucket, object_name))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_storage() -> (LocalStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(
            temp_dir.path().to_path_buf(),
            "http://localhost:8088/files/".to_string(),
        )
        .await
        .unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_upload_writes_file() {
        let (storage, temp_dir) = create_test_storage().await;

        let url = storage
            .upload(
                "photos",
                "2024/cat.png",
                Bytes::from_static(b"png-bytes"),
                "image/png",
            )
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8088/files/photos/2024/cat.png");
        let written = std::fs::read(temp_dir.path().join("photos/2024/cat.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let (storage, temp_dir) = create_test_storage().await;

        storage
            .upload("photos", "cat.png", Bytes::from_static(b"first"), "image/png")
            .await
            .unwrap();
        storage
            .upload("photos", "cat.png", Bytes::from_static(b"second"), "image/png")
            .await
            .unwrap();

        let written = std::fs::read(temp_dir.path().join("photos/cat.png")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal() {
        let (storage, _temp_dir) = create_test_storage().await;

        let result = storage
            .upload("photos", "../../etc/passwd", Bytes::new(), "text/plain")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .upload("..", "cat.png", Bytes::new(), "image/png")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_backend_type() {
        let (storage, _temp_dir) = create_test_storage().await;
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}

use crate::keys::{validate_bucket, validate_object_key};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use object_store::Result as ObjectResult;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Number of per-bucket clients kept between uploads
pub const MAX_CACHED_CLIENTS: usize = 32;

/// S3 storage implementation
///
/// The destination bucket is chosen per upload, so a client is built for
/// each bucket. Clients are cached only after a successful upload, in an
/// LRU bounded by `MAX_CACHED_CLIENTS`.
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: Mutex<LruCache<String, AmazonS3>>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Storage {
            region,
            endpoint_url,
            stores: Mutex::new(LruCache::new(
                NonZeroUsize::new(MAX_CACHED_CLIENTS).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    fn build_store(&self, bucket: &str) -> StorageResult<AmazonS3> {
        // Credentials come from the standard AWS environment variables.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    fn poisoned<T>(_: T) -> StorageError {
        StorageError::BackendError("S3 client cache poisoned".to_string())
    }

    /// Cached client for `bucket`, or a fresh one that is not cached yet
    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        if let Some(store) = self.stores.lock().map_err(Self::poisoned)?.get(bucket) {
            return Ok(store.clone());
        }

        tracing::debug!(bucket = %bucket, region = %self.region, "Created S3 client for bucket");
        self.build_store(bucket)
    }

    fn remember(&self, bucket: &str, store: AmazonS3) -> StorageResult<()> {
        self.stores
            .lock()
            .map_err(Self::poisoned)?
            .put(bucket.to_string(), store);
        Ok(())
    }

    #[cfg(test)]
    fn cached_clients(&self) -> usize {
        self.stores.lock().map(|stores| stores.len()).unwrap_or(0)
    }

    /// Generate public URL for S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style URLs on the configured endpoint
    fn generate_url(&self, bucket: &str, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, bucket, key)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key)
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_bucket(bucket)?;
        validate_object_key(object_name)?;

        let store = self.store_for(bucket)?;
        let size = data.len() as u64;
        let location = Path::from(object_name.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %object_name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;
        self.remember(bucket, store)?;

        let url = self.generate_url(bucket, object_name);

        tracing::info!(
            bucket = %bucket,
            key = %object_name,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_aws() {
        let storage = S3Storage::new("eu-west-1".to_string(), None);
        assert_eq!(
            storage.generate_url("photos", "cats/tom.jpg"),
            "https://photos.s3.eu-west-1.amazonaws.com/cats/tom.jpg"
        );
    }

    #[test]
    fn test_generate_url_custom_endpoint() {
        let storage = S3Storage::new(
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        );
        assert_eq!(
            storage.generate_url("photos", "tom.jpg"),
            "http://localhost:9000/photos/tom.jpg"
        );
    }

    #[test]
    fn test_client_cache_is_bounded() {
        let storage = S3Storage::new(
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
        );
        for i in 0..(MAX_CACHED_CLIENTS * 3) {
            let bucket = format!("bucket-{}", i);
            let store = storage.store_for(&bucket).unwrap();
            storage.remember(&bucket, store).unwrap();
        }
        assert_eq!(storage.cached_clients(), MAX_CACHED_CLIENTS);
    }

    #[test]
    fn test_client_is_not_cached_before_upload() {
        let storage = S3Storage::new("us-east-1".to_string(), None);
        storage.store_for("photos").unwrap();
        storage.store_for("other").unwrap();
        assert_eq!(storage.cached_clients(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_destination() {
        let storage = S3Storage::new("us-east-1".to_string(), None);
        let result = storage
            .upload("photos", "../escape.jpg", Bytes::from_static(b"x"), "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}

//! Shared destination validation for storage backends.

use crate::{StorageError, StorageResult};

/// Reject bucket names that are empty or could escape a base directory.
pub fn validate_bucket(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() {
        return Err(StorageError::InvalidKey("Bucket name is empty".to_string()));
    }
    if bucket.contains("..") || bucket.contains('/') || bucket.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Bucket name contains invalid characters: {}",
            bucket
        )));
    }
    Ok(())
}

/// Reject object names that are empty, absolute, or contain `..`.
pub fn validate_object_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Object name is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Object name contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}

//! Pixelgate Storage Library
//!
//! This crate provides the storage collaborator used to persist transformed
//! images. It includes the `Storage` trait and implementations for S3 and the
//! local filesystem.
//!
//! # Object naming
//!
//! Every upload names a destination bucket and an object name. On S3 these
//! map directly to the bucket and key; the local backend stores the object at
//! `{base_path}/{bucket}/{object_name}`. Bucket names and object names must not
//! contain `..` or start with `/`; the `keys` module validates both so all
//! backends agree on what is accepted.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use pixelgate_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};

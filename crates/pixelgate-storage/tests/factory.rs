use pixelgate_core::{Config, StorageBackend};
use pixelgate_storage::create_storage;
use tempfile::TempDir;

#[tokio::test]
async fn test_no_backend_disables_persistence() {
    let config = Config::default();
    let storage = create_storage(&config).await.unwrap();
    assert!(storage.is_none());
}

#[tokio::test]
async fn test_local_backend_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        storage_backend: Some(StorageBackend::Local),
        local_storage_path: Some(temp_dir.path().join("store").display().to_string()),
        ..Default::default()
    };

    let storage = create_storage(&config).await.unwrap().expect("storage configured");
    assert_eq!(storage.backend_type(), StorageBackend::Local);
    assert!(temp_dir.path().join("store").is_dir());

    let url = storage
        .upload("bucket", "out.png", bytes::Bytes::from_static(b"data"), "image/png")
        .await
        .unwrap();
    assert!(url.ends_with("/bucket/out.png"));
}

#[tokio::test]
async fn test_s3_backend_without_region_fails() {
    let config = Config {
        storage_backend: Some(StorageBackend::S3),
        ..Default::default()
    };
    assert!(create_storage(&config).await.is_err());
}

#[tokio::test]
async fn test_s3_backend_from_config() {
    let config = Config {
        storage_backend: Some(StorageBackend::S3),
        s3_region: Some("eu-central-1".to_string()),
        s3_endpoint: Some("http://localhost:9000".to_string()),
        ..Default::default()
    };
    let storage = create_storage(&config).await.unwrap().expect("storage configured");
    assert_eq!(storage.backend_type(), StorageBackend::S3);
}

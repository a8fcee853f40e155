//! HTTP surface tests
//!
//! Run with: `cargo test -p pixelgate-api --test http`

use axum::http::StatusCode;
use axum_test::TestServer;
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use pixelgate_api::{setup_routes, AppState};
use pixelgate_core::{Config, StorageBackend};
use std::io::Cursor;

fn png(width: u32, height: u32) -> Bytes {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90])));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
    Bytes::from(cursor.into_inner())
}

async fn server_with(config: Config) -> TestServer {
    let state = AppState::from_config(config).await.unwrap();
    TestServer::new(setup_routes(state)).unwrap()
}

async fn server() -> TestServer {
    server_with(Config::default()).await
}

#[tokio::test]
async fn test_health() {
    let response = server().await.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_operations() {
    let response = server().await.get("/operations").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let operations = body["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 12);
    assert!(operations.iter().any(|op| op == "resize"));
}

#[tokio::test]
async fn test_resize_returns_image_with_content_type() {
    let response = server()
        .await
        .post("/resize")
        .add_query_param("width", 20)
        .bytes(png(40, 30))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");

    let img = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!(img.dimensions(), (20, 15));
}

#[tokio::test]
async fn test_convert_via_query_type() {
    let response = server()
        .await
        .post("/convert")
        .add_query_param("type", "jpeg")
        .bytes(png(8, 8))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/jpeg");
}

#[tokio::test]
async fn test_info_returns_json() {
    let response = server().await.post("/info").bytes(png(12, 7)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["width"], 12);
    assert_eq!(body["height"], 7);
    assert_eq!(body["type"], "png");
}

#[tokio::test]
async fn test_missing_param_is_bad_request() {
    let response = server().await.post("/enlarge").bytes(png(8, 8)).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["recoverable"], false);
    assert!(body["error"].as_str().unwrap().contains("height, width"));
}

#[tokio::test]
async fn test_production_config_hides_error_details() {
    let config = Config {
        environment: "production".to_string(),
        ..Config::default()
    };
    let response = server_with(config).await.post("/enlarge").bytes(png(8, 8)).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert!(body.get("details").is_none());

    let response = server().await.post("/enlarge").bytes(png(8, 8)).await;
    let body: serde_json::Value = response.json();
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_unknown_operation_is_bad_request() {
    let response = server().await.post("/sharpen").bytes(png(8, 8)).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_query_is_bad_request() {
    let response = server()
        .await
        .post("/resize")
        .add_query_param("width", "wide")
        .bytes(png(8, 8))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_corrupt_image_is_unprocessable() {
    let response = server()
        .await
        .post("/flip")
        .bytes(Bytes::from_static(b"\x89PNG\r\n\x1a\nbroken"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_persistence_without_storage_is_bad_gateway() {
    let response = server()
        .await
        .post("/flip")
        .add_query_param("bucket", "photos")
        .add_query_param("name", "flipped.png")
        .bytes(png(8, 8))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(body["recoverable"], true);
}

#[tokio::test]
async fn test_persistence_with_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage_backend: Some(StorageBackend::Local),
        local_storage_path: Some(dir.path().to_string_lossy().into_owned()),
        ..Config::default()
    };
    let response = server_with(config)
        .await
        .post("/flop")
        .add_query_param("bucket", "photos")
        .add_query_param("name", "flopped.png")
        .bytes(png(8, 8))
        .await;
    response.assert_status_ok();

    let stored = std::fs::read(dir.path().join("photos").join("flopped.png")).unwrap();
    assert_eq!(stored.as_slice(), response.as_bytes().as_ref());
}

#[tokio::test]
async fn test_body_limit() {
    let config = Config {
        max_body_size_bytes: 16,
        ..Config::default()
    };
    let response = server_with(config)
        .await
        .post("/flip")
        .bytes(png(64, 64))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

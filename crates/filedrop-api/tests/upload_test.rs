//! End-to-end tests for the upload surface, driven through the real router
//! with a local storage backend in a temporary directory.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use filedrop_api::setup::routes::setup_routes;
use filedrop_api::state::AppState;
use filedrop_core::{Config, StorageBackend};
use filedrop_storage::{LocalStorage, Storage, StorageError, StorageResult};
use tempfile::TempDir;

const BASE_URL: &str = "http://localhost:8080/files";
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

struct TestApp {
    server: TestServer,
    storage_dir: TempDir,
}

fn test_config(storage_dir: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_backend: StorageBackend::Local,
        gcs_bucket: None,
        local_storage_path: Some(storage_dir.path().to_string_lossy().into_owned()),
        local_storage_base_url: Some(BASE_URL.to_string()),
        max_file_size_bytes: MAX_FILE_SIZE,
        allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "text/plain".to_string(),
            "application/pdf".to_string(),
        ],
    }
}

async fn setup_test_app() -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&storage_dir);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = setup_routes(&config, state).expect("Failed to build router");

    TestApp {
        server: TestServer::new(router).expect("Failed to start test server"),
        storage_dir,
    }
}

/// Build a test app whose storage backend fails every write.
fn setup_failing_app() -> TestServer {
    let storage_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&storage_dir);

    let state = Arc::new(AppState::new(config.clone(), Arc::new(FailingStorage)));
    let router = setup_routes(&config, state).expect("Failed to build router");

    TestServer::new(router).expect("Failed to start test server")
}

fn stored_objects(app: &TestApp) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(app.storage_dir.path())
        .expect("Failed to read storage directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(
        &self,
        _filename: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        Err(StorageError::UploadFailed(
            "simulated backend outage".to_string(),
        ))
    }

    async fn exists(&self, _object_key: &str) -> StorageResult<bool> {
        Err(StorageError::BackendError(
            "simulated backend outage".to_string(),
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = setup_test_app().await;

    let response = app.server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "File upload service is running");
}

#[tokio::test]
async fn preflight_is_allowed_from_any_origin() {
    let app = setup_test_app().await;

    let response = app
        .server
        .method(Method::OPTIONS, "/upload")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://example.com"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;

    response.assert_status_ok();
    let headers = response.headers();
    let allow_origin = headers.get("access-control-allow-origin").unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "*");
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Please upload a file");
    assert!(stored_objects(&app).is_empty());
}

#[tokio::test]
async fn upload_with_disallowed_type_is_rejected() {
    let app = setup_test_app().await;

    let part = Part::bytes(b"MZ\x90\x00".to_vec())
        .file_name("tool.exe")
        .mime_type("application/x-msdownload");
    let form = MultipartForm::new().add_part("file", part);
    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(
        body["error"],
        "Invalid file type. Only images, text, or PDF allowed to Upload"
    );
    assert!(stored_objects(&app).is_empty());
}

#[tokio::test]
async fn upload_over_size_limit_is_rejected() {
    let app = setup_test_app().await;

    let part = Part::bytes(vec![0u8; MAX_FILE_SIZE + 1])
        .file_name("big.png")
        .mime_type("image/png");
    let form = MultipartForm::new().add_part("file", part);
    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "File too large. Max 5MB allowed.");
    assert!(stored_objects(&app).is_empty());
}

#[tokio::test]
async fn valid_upload_stores_object_and_returns_metadata() {
    let app = setup_test_app().await;

    let data = vec![0xABu8; 10 * 1024];
    let part = Part::bytes(data.clone())
        .file_name("photo.png")
        .mime_type("image/png");
    let form = MultipartForm::new().add_part("file", part);
    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(body["metadata"]["originalName"], "photo.png");
    assert_eq!(body["metadata"]["mimeType"], "image/png");
    assert_eq!(body["metadata"]["sizeKB"], "10.00");
    chrono::DateTime::parse_from_rfc3339(body["metadata"]["uploadedAt"].as_str().unwrap())
        .expect("uploadedAt must be a valid RFC 3339 timestamp");

    let file_url = body["fileUrl"].as_str().unwrap();
    let key = file_url
        .strip_prefix(&format!("{}/", BASE_URL))
        .expect("fileUrl must live under the storage base URL");
    let (timestamp, name) = key.split_once('_').unwrap();
    assert!(timestamp.parse::<i64>().unwrap() > 0);
    assert_eq!(name, "photo.png");

    assert_eq!(stored_objects(&app), vec![key.to_string()]);
    let stored = std::fs::read(app.storage_dir.path().join(key)).unwrap();
    assert_eq!(stored, data);
}

#[tokio::test]
async fn same_filename_uploads_get_distinct_urls() {
    let app = setup_test_app().await;

    let mut urls = Vec::new();
    for _ in 0..2 {
        let part = Part::bytes(b"content".to_vec())
            .file_name("photo.png")
            .mime_type("image/png");
        let form = MultipartForm::new().add_part("file", part);
        let response = app.server.post("/upload").multipart(form).await;
        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        urls.push(body["fileUrl"].as_str().unwrap().to_string());

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    assert_ne!(urls[0], urls[1]);
    assert_eq!(stored_objects(&app).len(), 2);
}

#[tokio::test]
async fn storage_write_failure_returns_500() {
    let server = setup_failing_app();

    let part = Part::bytes(b"hello".to_vec())
        .file_name("note.txt")
        .mime_type("text/plain");
    let form = MultipartForm::new().add_part("file", part);
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error uploading file");
}

#[tokio::test]
async fn health_reflects_storage_state() {
    let app = setup_test_app().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");

    let failing = setup_failing_app();
    let response = failing.get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "degraded");
}

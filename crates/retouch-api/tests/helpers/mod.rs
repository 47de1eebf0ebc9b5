//! Test helpers: build the router and a TestServer for integration tests.
//!
//! Run from workspace root: `cargo test -p retouch-api --test editor_test`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use retouch_api::setup::routes;
use retouch_api::state::AppState;
use retouch_core::Config;
use std::sync::Arc;

/// Upload cap used by the test server, small enough to exercise 413 cheaply.
pub const TEST_MAX_UPLOAD_BYTES: usize = 256 * 1024;

pub fn test_config() -> Config {
    Config {
        max_upload_size_bytes: TEST_MAX_UPLOAD_BYTES,
        ..Config::default()
    }
}

pub fn setup_test_server() -> TestServer {
    setup_test_server_with(test_config())
}

pub fn setup_test_server_with(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config.clone()));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(app).expect("Failed to create test server")
}

/// Multipart form with a single file part.
pub fn file_form(filename: &str, data: Vec<u8>, mime: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename)
        .mime_type(mime);
    MultipartForm::new().add_part("file", part)
}

/// Decode a `data:image/jpeg;base64,...` URI.
pub fn decode_data_uri(uri: &str) -> DynamicImage {
    let payload = uri
        .strip_prefix("data:image/jpeg;base64,")
        .expect("Expected a JPEG data URI");
    let bytes = STANDARD.decode(payload).expect("Invalid base64 payload");
    image::load_from_memory(&bytes).expect("Data URI is not a decodable image")
}

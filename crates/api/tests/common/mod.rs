#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::assets::{AssetStore, DEFAULT_ASSET};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Contents of the default image written into every test asset directory.
pub const DEFAULT_IMAGE_BYTES: &[u8] = b"default image bytes";

const BOUNDARY: &str = "catalog-test-boundary";

/// Build a test `ServerConfig` with safe defaults rooted at `image_dir`.
pub fn test_config(image_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        image_dir: image_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        request_timeout_secs: 30,
    }
}

/// A running test application and the temp directory backing its assets.
pub struct TestApp {
    pub router: Router,
    pub assets: AssetStore,
    _dir: TempDir,
}

/// Build the full application router over `pool` and a fresh asset
/// directory containing `default.jpg`.
pub async fn build_test_app(pool: PgPool) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let image_dir = dir.path().join("images");
    let assets = AssetStore::open(image_dir.clone()).await.unwrap();
    std::fs::write(image_dir.join(DEFAULT_ASSET), DEFAULT_IMAGE_BYTES).unwrap();

    let config = test_config(&image_dir);
    let state = AppState::new(pool, config.clone(), assets.clone());
    TestApp {
        router: build_app_router(state, &config),
        assets,
        _dir: dir,
    }
}

/// Number of files in the asset directory other than `default.jpg`.
pub fn stored_asset_count(assets: &AssetStore) -> usize {
    std::fs::read_dir(assets.root())
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_name() != DEFAULT_ASSET)
        .count()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a url-encoded form.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart form with text fields and an optional `image` file.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<&[u8]>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

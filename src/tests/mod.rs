//! Unit and integration tests for Inventar.
//!
//! ## Test Modules
//!
//! - **store_tests**: loading, persisting and id allocation of the item store
//! - **api_tests**: the item API end to end through the real router
//! - **health_api_tests**: health, readiness, metrics and version endpoints
//! - **error_tests**: error mapping and the JSON error body
//! - **config_tests**: configuration defaults, layering and validation
//!
//! Run a single module with e.g. `cargo test api_tests`.

pub mod error_tests;

use std::path::{Path, PathBuf};

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{app, config::AppConfig, state::AppState, store::InventoryStore};

/// A router over a store whose data file lives in a fresh temp directory.
pub(crate) struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub data_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("inventory.json");
        Self::with_data_file(dir, data_file).await
    }

    pub async fn with_data_file(dir: TempDir, data_file: PathBuf) -> Self {
        let mut config = AppConfig::default();
        config.storage.data_file = data_file.display().to_string();
        let store = InventoryStore::load(&data_file).await.unwrap();
        let state = AppState::new(store, config);
        let router = app::build_app(state.clone(), Path::new(app::BUILTIN_FRONTEND_DIR));
        Self { router, state, data_file, _dir: dir }
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.send(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub(crate) async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub(crate) async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

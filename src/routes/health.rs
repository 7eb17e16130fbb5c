use std::path::Path;

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Health check endpoint - lightweight, touches no state
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: the data file's directory must exist so persists can succeed
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let data_dir = {
        let store = state.store.lock().await;
        match store.path().parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        }
    };
    let check = tokio::fs::metadata(&data_dir);
    match tokio::time::timeout(std::time::Duration::from_secs(5), check).await {
        Ok(Ok(meta)) if meta.is_dir() => (StatusCode::OK, "ready").into_response(),
        Ok(Ok(_)) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: data path is not a directory").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP inventar_items_created Total items created\n# TYPE inventar_items_created counter\ninventar_items_created {}\n\
# HELP inventar_items_updated Total items updated\n# TYPE inventar_items_updated counter\ninventar_items_updated {}\n\
# HELP inventar_items_deleted Total items removed\n# TYPE inventar_items_deleted counter\ninventar_items_deleted {}\n\
# HELP inventar_bulk_deletes Delete-all requests\n# TYPE inventar_bulk_deletes counter\ninventar_bulk_deletes {}\n\
# HELP inventar_downloads Inventory file downloads\n# TYPE inventar_downloads counter\ninventar_downloads {}\n\
# HELP inventar_persist_failures Failed writes of the inventory file\n# TYPE inventar_persist_failures counter\ninventar_persist_failures {}\n\
# HELP inventar_uptime_seconds Uptime seconds\n# TYPE inventar_uptime_seconds gauge\ninventar_uptime_seconds {}\n",
        m.items_created,
        m.items_updated,
        m.items_deleted,
        m.bulk_deletes,
        m.downloads,
        m.persist_failures,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}

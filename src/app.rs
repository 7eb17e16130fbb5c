use std::path::{Path, PathBuf};

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{middleware, routes, state::AppState};

/// Frontend assets shipped with the crate, used when nothing is found at runtime.
pub const BUILTIN_FRONTEND_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Builds the complete application: API routes, frontend and middleware stack.
pub fn build_app(state: AppState, frontend_dir: &Path) -> Router {
    let index = frontend_dir.join("index.html");
    let static_service = ServeDir::new(frontend_dir);

    let cfg_arc = state.config.clone();
    let body_limit = state.config.server.body_limit_bytes;

    let api = Router::new()
        .route("/api/items", get(routes::items::list_items).post(routes::items::create_item))
        .route("/api/items/all", delete(routes::items::delete_all_items))
        .route("/api/items/search", get(routes::items::search_items))
        .route("/api/items/total", get(routes::items::total_quantity))
        .route(
            "/api/items/{id}",
            get(routes::items::get_item).put(routes::items::update_item).delete(routes::items::delete_item),
        )
        .route("/api/download", get(routes::export::download_inventory));

    Router::new()
        .merge(api)
        .route("/healthz", get(routes::health::healthz))
        .route("/readyz", get(routes::health::readyz))
        .route("/metrics", get(routes::health::metrics))
        .route("/metrics/prometheus", get(routes::health::metrics_prometheus))
        .route("/version", get(routes::health::version))
        .route_service("/", ServeFile::new(index))
        .fallback_service(static_service)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, middleware::security_headers::security_headers_middleware))
        // Alle Origins erlaubt, auch im Release-Build
        .layer(CorsLayer::permissive())
}

/// Picks the frontend directory: `<exe_dir>/static` first, then the configured
/// directory, then the assets bundled at build time.
pub fn resolve_frontend_dir(configured: &str) -> PathBuf {
    let runtime = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("static")))
        .filter(|d| d.join("index.html").is_file());
    if let Some(dir) = runtime {
        return dir;
    }

    let configured = PathBuf::from(configured);
    if configured.join("index.html").is_file() {
        return configured;
    }

    tracing::warn!(
        "No index.html in {}, falling back to built-in frontend",
        configured.display()
    );
    PathBuf::from(BUILTIN_FRONTEND_DIR)
}

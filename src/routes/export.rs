use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::{
    error::{AppResult, OptionExt},
    state::AppState,
};

const DEFAULT_FILENAME: &str = "inventory.json";

/// Sends the data file exactly as it is on disk, as an attachment.
pub async fn download_inventory(State(state): State<AppState>) -> AppResult<Response> {
    // Read under the lock so we never see a half-written file
    let store = state.store.lock().await;
    let bytes = store.read_file().await?.ok_or_not_found("Inventory file")?;
    let filename = store
        .path()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();
    drop(store);

    state.metrics.inc_downloads();

    let mut response = bytes.into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
    if let Ok(header_val) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, header_val);
    }
    Ok(response)
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::{AppError, AppResult, OptionExt},
    extract::{ApiJson, ApiPath, ApiQuery},
    metrics::Metrics,
    state::AppState,
    store::{ItemChanges, StoreError},
    types::{CreateItemRequest, MessageResponse, SearchQuery, TotalQuantity, UpdateItemRequest},
};

fn count_write_failure(metrics: &Metrics, err: &StoreError) {
    if err.is_write_failure() {
        metrics.inc_persist_failures();
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(name), Some(quantity)) = (req.name, req.quantity) else {
        return Err(AppError::BadRequest("Missing 'name' or 'quantity'".to_string()));
    };

    let mut store = state.store.lock().await;
    let item = store.create(name, quantity).await.inspect_err(|e| count_write_failure(&state.metrics, e))?;
    state.metrics.inc_items_created();
    tracing::info!("Created item {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(store.items().to_vec())
}

pub async fn get_item(State(state): State<AppState>, ApiPath(id): ApiPath<u64>) -> AppResult<impl IntoResponse> {
    let store = state.store.lock().await;
    let item = store.find_by_id(id).cloned().ok_or_not_found("Item")?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let changes = ItemChanges { name: req.name, quantity: req.quantity };

    let mut store = state.store.lock().await;
    let updated = store
        .update(id, changes)
        .await
        .inspect_err(|e| count_write_failure(&state.metrics, e))?
        .ok_or_not_found("Item")?;
    state.metrics.inc_items_updated();
    Ok(Json(updated))
}

// Unknown ids are not an error: the item is absent afterwards either way.
pub async fn delete_item(State(state): State<AppState>, ApiPath(id): ApiPath<u64>) -> AppResult<impl IntoResponse> {
    let mut store = state.store.lock().await;
    let removed = store.delete(id).await.inspect_err(|e| count_write_failure(&state.metrics, e))?;
    state.metrics.add_items_deleted(removed as u64);
    if removed == 0 {
        tracing::debug!("Delete of unknown item {} was a no-op", id);
    }
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

pub async fn delete_all_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut store = state.store.lock().await;
    let removed = store.clear().await.inspect_err(|e| count_write_failure(&state.metrics, e))?;
    state.metrics.add_items_deleted(removed as u64);
    state.metrics.inc_bulk_deletes();
    Ok(Json(MessageResponse::new("All items deleted.")))
}

pub async fn search_items(State(state): State<AppState>, ApiQuery(query): ApiQuery<SearchQuery>) -> impl IntoResponse {
    let needle = query.name.unwrap_or_default();
    let store = state.store.lock().await;
    Json(store.search(&needle))
}

pub async fn total_quantity(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(TotalQuantity { total_quantity: store.total_quantity() })
}

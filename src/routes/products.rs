use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    errors::Result,
    models::{ProductFilters, ProductPayload},
    state::AppState,
};

/// List the whole catalog
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

/// Filtered catalog search; every query parameter narrows the result
pub async fn search_products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> Result<impl IntoResponse> {
    let products = state.products.search(filters).await?;
    Ok(Json(products))
}

/// Fetch a single product, 404 when absent
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.products.get(id).await?;
    Ok(Json(product))
}

/// Create a product; invalid data is a 400
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    let product = state.products.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields, re-validating the merged record
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    let product = state.products.update(id, payload).await?;
    Ok(Json(product))
}

/// Delete a product, 404 when absent
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.products.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

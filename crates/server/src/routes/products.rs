use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use service::{
    domain::{Product, ProductFields},
    errors::EntityKind,
    pagination::{apply_limit, parse_limit},
};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::parse_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

/// Decode a product body. An empty body is an empty object.
fn parse_fields(body: &Bytes) -> Result<ProductFields, JsonApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProductFields::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(JsonApiError::bad_request("product body must be a JSON object")),
        Err(e) => Err(JsonApiError::bad_request(format!("invalid JSON body: {e}"))),
    }
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.products.list().await?;
    info!(count = products.len(), "list products");
    Ok(Json(products))
}

/// First N products in stored order; everything when `limit` is absent or falsy,
/// all but the last |N| when it is negative.
pub async fn list_limited(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    let limit = parse_limit(q.limit.as_deref());
    let products = apply_limit(state.products.list().await?, limit);
    info!(count = products.len(), ?limit, "list limited products");
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, JsonApiError> {
    let id = parse_id(&id, EntityKind::Product)?;
    Ok(Json(state.products.get(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let fields = parse_fields(&body)?;
    let product = state.products.create(fields).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, JsonApiError> {
    let id = parse_id(&id, EntityKind::Product)?;
    let patch = parse_fields(&body)?;
    Ok(Json(state.products.update(id, patch).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id, EntityKind::Product)?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

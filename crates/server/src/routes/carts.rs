use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::{
    domain::{Cart, LineItem},
    errors::EntityKind,
};

use crate::errors::JsonApiError;
use crate::routes::parse_id;
use crate::state::AppState;

pub async fn create_cart(State(state): State<AppState>) -> Result<(StatusCode, Json<Cart>), JsonApiError> {
    let cart = state.carts.create().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// Only the line items are returned, not the cart envelope.
pub async fn get_cart_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LineItem>>, JsonApiError> {
    let id = parse_id(&id, EntityKind::Cart)?;
    let cart = state.carts.get(id).await?;
    Ok(Json(cart.products))
}

pub async fn add_product(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
) -> Result<Json<Cart>, JsonApiError> {
    let cart_id = parse_id(&cart_id, EntityKind::Cart)?;
    match parse_id(&product_id, EntityKind::Product) {
        Ok(product_id) => Ok(Json(state.carts.add_line_item(cart_id, product_id).await?)),
        // the cart is still checked first
        Err(e) => {
            state.carts.get(cart_id).await?;
            Err(e)
        }
    }
}

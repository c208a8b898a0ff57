//! HTTP surface.
//!
//! ```text
//! GET    /health
//! GET    /metrics
//! GET    /products
//! GET    /products/limited?limit=N
//! GET    /products/:id
//! POST   /products
//! PUT    /products/:id
//! DELETE /products/:id
//! POST   /carts
//! GET    /carts/:id
//! POST   /carts/:id/product/:product_id
//! ```

pub mod carts;
pub mod products;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use service::{domain::EntityId, errors::EntityKind, observability};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    match observability::encode_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// Path ids that are not valid identifiers cannot name a stored entity.
pub(crate) fn parse_id(raw: &str, kind: EntityKind) -> Result<EntityId, JsonApiError> {
    raw.parse::<EntityId>().map_err(|_| JsonApiError::not_found(kind))
}

/// Build the full application router.
///
/// `max_in_flight` bounds how many requests run at once across all routes;
/// with `1` every request finishes its read-modify-write before the next starts.
pub fn build_router(state: AppState, cors: CorsLayer, max_in_flight: usize) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let product_routes = Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/limited", get(products::list_limited))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let cart_routes = Router::new()
        .route("/carts", post(carts::create_cart))
        .route("/carts/:id", get(carts::get_cart_items))
        .route("/carts/:id/product/:product_id", post(carts::add_product));

    ops.merge(product_routes)
        .merge(cart_routes)
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(max_in_flight.max(1)))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_numeric_as_not_found() {
        assert_eq!(parse_id("42", EntityKind::Product).unwrap(), 42);
        let err = parse_id("abc", EntityKind::Cart).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let err = parse_id("-1", EntityKind::Product).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}

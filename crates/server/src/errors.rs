use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::{EntityKind, ServiceError};
use tracing::error;

pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const CART_NOT_FOUND: &str = "Carrito no encontrado";

/// Error returned by handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(kind: EntityKind) -> Self {
        let msg = match kind {
            EntityKind::Product => PRODUCT_NOT_FOUND,
            EntityKind::Cart => CART_NOT_FOUND,
        };
        Self::new(StatusCode::NOT_FOUND, msg)
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(kind) => Self::not_found(kind),
            ServiceError::StorageUnavailable(msg) => {
                error!(error = %msg, "storage unavailable");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServiceError::IdSpaceExhausted(kind) => {
                error!(entity = %kind, "identifier space exhausted");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, ServiceError::IdSpaceExhausted(kind).to_string())
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

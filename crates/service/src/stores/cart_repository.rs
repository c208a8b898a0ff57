use crate::domain::{Cart, EntityId};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for cart storage, one aggregate per cart.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self) -> Result<Cart, ServiceError>;
    async fn get(&self, id: EntityId) -> Result<Cart, ServiceError>;
    /// Add one unit of `product_id`; the product must exist in the catalog.
    async fn add_line_item(&self, cart_id: EntityId, product_id: EntityId) -> Result<Cart, ServiceError>;
}

use crate::domain::{EntityId, Product, ProductFields};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the product collection.
/// Implementations persist the whole collection as one aggregate.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: EntityId) -> Result<Product, ServiceError>;
    async fn create(&self, fields: ProductFields) -> Result<Product, ServiceError>;
    async fn update(&self, id: EntityId, patch: ProductFields) -> Result<Product, ServiceError>;
    async fn delete(&self, id: EntityId) -> Result<(), ServiceError>;
}

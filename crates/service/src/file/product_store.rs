use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{EntityId, Product, ProductFields};
use crate::errors::{EntityKind, ServiceError};
use crate::ids;
use crate::observability::{DOCUMENT_READ_FAILURES_TOTAL, DOCUMENT_WRITES_TOTAL};
use crate::storage::json_document::{ensure_document, read_document, write_document};
use crate::stores::ProductCatalog;

const ENTITY: &str = "product";

/// Product collection kept in a single JSON document.
///
/// No state is cached: every operation reads the document, and every mutation
/// rewrites it whole. Two overlapping mutations lose one of the updates.
#[derive(Clone, Debug)]
pub struct FileProductStore {
    file_path: PathBuf,
}

impl FileProductStore {
    /// Initialize the store, seeding an empty collection if the file is missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let created = ensure_document(&file_path, &Vec::<Product>::new())
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        if created {
            info!(path = %file_path.display(), "seeded empty product collection");
        }
        Ok(Arc::new(Self { file_path }))
    }

    async fn load(&self) -> Result<Vec<Product>, ServiceError> {
        read_document(&self.file_path).await.map_err(|e| {
            DOCUMENT_READ_FAILURES_TOTAL.with_label_values(&[ENTITY]).inc();
            error!(error = %e, "product collection unreadable");
            ServiceError::StorageUnavailable(e.to_string())
        })
    }

    async fn save(&self, products: &[Product]) -> Result<(), ServiceError> {
        write_document(&self.file_path, products)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        DOCUMENT_WRITES_TOTAL.with_label_values(&[ENTITY]).inc();
        debug!(count = products.len(), "product collection rewritten");
        Ok(())
    }

    /// List all products in stored order.
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.load().await
    }

    pub async fn get(&self, id: EntityId) -> Result<Product, ServiceError> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(ServiceError::product_not_found)
    }

    /// Assign a fresh id, append and persist.
    pub async fn create(&self, fields: ProductFields) -> Result<Product, ServiceError> {
        let mut products = self.load().await?;
        let live: HashSet<EntityId> = products.iter().map(|p| p.id).collect();
        let id = ids::allocate_id(EntityKind::Product, live.len(), |c| live.contains(&c), ids::random_candidate)?;
        let product = Product::new(id, fields);
        products.push(product.clone());
        self.save(&products).await?;
        info!(product_id = id, "product created");
        Ok(product)
    }

    /// Shallow-merge `patch` onto the stored product and persist.
    pub async fn update(&self, id: EntityId, patch: ProductFields) -> Result<Product, ServiceError> {
        let mut products = self.load().await?;
        let existing = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(ServiceError::product_not_found)?;
        existing.merge(patch);
        let updated = existing.clone();
        self.save(&products).await?;
        info!(product_id = id, "product updated");
        Ok(updated)
    }

    /// Remove the product; the document is only rewritten when something was removed.
    pub async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        let products = self.load().await?;
        let before = products.len();
        let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
        if remaining.len() == before {
            return Err(ServiceError::product_not_found());
        }
        self.save(&remaining).await?;
        info!(product_id = id, "product deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductCatalog for FileProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> { self.list().await }
    async fn get(&self, id: EntityId) -> Result<Product, ServiceError> { self.get(id).await }
    async fn create(&self, fields: ProductFields) -> Result<Product, ServiceError> { self.create(fields).await }
    async fn update(&self, id: EntityId, patch: ProductFields) -> Result<Product, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> { self.delete(id).await }
}

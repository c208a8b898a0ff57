use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::{Cart, EntityId};
use crate::errors::{EntityKind, ServiceError};
use crate::ids;
use crate::observability::{DOCUMENT_READ_FAILURES_TOTAL, DOCUMENT_WRITES_TOTAL};
use crate::storage::json_document::{read_document, write_document};
use crate::stores::{CartRepository, ProductCatalog};

const ENTITY: &str = "cart";

/// One JSON document per cart, named `<prefix><id>.json` inside `dir`.
///
/// Cart ids are checked for collisions against the directory listing at
/// creation time. Any failure to read or parse a cart document is reported as
/// the cart not existing.
#[derive(Clone)]
pub struct FileCartStore {
    dir: PathBuf,
    prefix: String,
    catalog: Arc<dyn ProductCatalog>,
}

impl FileCartStore {
    /// Initialize the store; creates `dir` if missing.
    pub async fn new<P: Into<PathBuf>>(
        dir: P,
        prefix: impl Into<String>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(format!("cannot create {}: {e}", dir.display())))?;
        Ok(Arc::new(Self { dir, prefix: prefix.into(), catalog }))
    }

    fn file_name(&self, id: EntityId) -> String {
        format!("{}{}.json", self.prefix, id)
    }

    fn cart_path(&self, id: EntityId) -> PathBuf {
        self.dir.join(self.file_name(id))
    }

    /// Id encoded in a cart document name; only exact `<prefix><id>.json` names count.
    fn parse_cart_id(&self, name: &str) -> Option<EntityId> {
        let id = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(".json")?
            .parse::<EntityId>()
            .ok()?;
        (name == self.file_name(id) && id < ids::ID_SPACE).then_some(id)
    }

    /// Ids of every cart document in the data directory.
    async fn existing_cart_ids(&self) -> Result<HashSet<EntityId>, ServiceError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(format!("cannot list {}: {e}", self.dir.display())))?;
        let mut live = HashSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServiceError::StorageUnavailable(format!("cannot list {}: {e}", self.dir.display())))?
        {
            if let Some(id) = entry.file_name().to_str().and_then(|name| self.parse_cart_id(name)) {
                live.insert(id);
            }
        }
        Ok(live)
    }

    async fn save(&self, cart: &Cart) -> Result<(), ServiceError> {
        write_document(&self.cart_path(cart.id), cart)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        DOCUMENT_WRITES_TOTAL.with_label_values(&[ENTITY]).inc();
        debug!(cart_id = cart.id, items = cart.products.len(), "cart document written");
        Ok(())
    }

    /// Allocate an id not used by any cart document and write an empty cart.
    pub async fn create(&self) -> Result<Cart, ServiceError> {
        let live = self.existing_cart_ids().await?;
        let id = ids::allocate_id(
            EntityKind::Cart,
            live.len(),
            |c| live.contains(&c),
            ids::random_candidate,
        )?;
        let cart = Cart::empty(id);
        self.save(&cart).await?;
        info!(cart_id = id, "cart created");
        Ok(cart)
    }

    /// Load a cart. Missing and unreadable documents are both `NotFound`.
    pub async fn get(&self, id: EntityId) -> Result<Cart, ServiceError> {
        read_cart(&self.cart_path(id)).await.ok_or_else(ServiceError::cart_not_found)
    }

    /// Add one unit of an existing product to an existing cart and persist.
    pub async fn add_line_item(&self, cart_id: EntityId, product_id: EntityId) -> Result<Cart, ServiceError> {
        let mut cart = self.get(cart_id).await?;
        self.catalog.get(product_id).await?;
        cart.add_product(product_id);
        self.save(&cart).await?;
        info!(cart_id, product_id, "line item added");
        Ok(cart)
    }
}

async fn read_cart(path: &Path) -> Option<Cart> {
    match read_document::<Cart>(path).await {
        Ok(cart) => Some(cart),
        Err(e) => {
            DOCUMENT_READ_FAILURES_TOTAL.with_label_values(&[ENTITY]).inc();
            warn!(error = %e, "cart document unavailable");
            None
        }
    }
}

#[async_trait::async_trait]
impl CartRepository for FileCartStore {
    async fn create(&self) -> Result<Cart, ServiceError> { self.create().await }
    async fn get(&self, id: EntityId) -> Result<Cart, ServiceError> { self.get(id).await }
    async fn add_line_item(&self, cart_id: EntityId, product_id: EntityId) -> Result<Cart, ServiceError> {
        self.add_line_item(cart_id, product_id).await
    }
}

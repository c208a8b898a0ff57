use std::sync::Arc;

use service::stores::{CartRepository, ProductCatalog};

/// Shared handler state: the two stores behind their traits.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductCatalog>,
    pub carts: Arc<dyn CartRepository>,
}

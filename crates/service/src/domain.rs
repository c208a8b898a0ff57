//! Entities persisted by the file stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier shared by products and carts, always below [`crate::ids::ID_SPACE`].
pub type EntityId = u32;

/// Caller-supplied product fields; everything except `id` is opaque to the store.
pub type ProductFields = Map<String, Value>;

/// A product: store-assigned `id` plus whatever fields the caller sent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// Build a product from caller input, dropping any caller-provided `id`.
    pub fn new(id: EntityId, mut fields: ProductFields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Shallow merge: every supplied key overwrites the stored one, `id` excepted.
    pub fn merge(&mut self, patch: ProductFields) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub product: EntityId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub id: EntityId,
    pub products: Vec<LineItem>,
}

impl Cart {
    pub fn empty(id: EntityId) -> Self {
        Self { id, products: Vec::new() }
    }

    /// Increment the line for `product`, or append a new one with quantity 1.
    pub fn add_product(&mut self, product: EntityId) {
        match self.products.iter_mut().find(|item| item.product == product) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.products.push(LineItem { product, quantity: 1 }),
        }
    }
}

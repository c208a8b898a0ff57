//! File-backed store implementations.

pub mod cart_store;
pub mod product_store;

pub use cart_store::FileCartStore;
pub use product_store::FileProductStore;

//! Store abstractions the HTTP layer talks to.

pub mod cart_repository;
pub mod product_catalog;

pub use cart_repository::CartRepository;
pub use product_catalog::ProductCatalog;

//! Service layer for the shop document store.
//! - Product collection persisted as one JSON document, carts as one document each.
//! - Random bounded identifiers with redraw-on-collision.
//! - Store traits consumed by the HTTP layer.

pub mod domain;
pub mod errors;
pub mod file;
pub mod ids;
pub mod observability;
pub mod pagination;
pub mod runtime;
pub mod storage;
pub mod stores;

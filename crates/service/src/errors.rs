use std::fmt;

use thiserror::Error;

/// Which aggregate an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Cart,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("no free {0} identifiers left")]
    IdSpaceExhausted(EntityKind),
}

impl ServiceError {
    pub fn product_not_found() -> Self { Self::NotFound(EntityKind::Product) }
    pub fn cart_not_found() -> Self { Self::NotFound(EntityKind::Cart) }
}

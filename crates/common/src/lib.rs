//! Shared building blocks for the shop document service: response types,
//! logging setup and data-directory bootstrap.

pub mod types;
pub mod utils;
pub mod env;

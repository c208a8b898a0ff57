//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates only depend on `service`
//! for storage bootstrap.

use std::path::Path;

/// Ensure the data directory exists.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::fs;

/// Why a document could not be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document {0} does not exist")]
    Missing(String),
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a whole JSON document.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let bytes = fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DocumentError::Missing(path.display().to_string()),
        _ => DocumentError::Io { path: path.display().to_string(), source: e },
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DocumentError::Malformed { path: path.display().to_string(), source: e })
}

/// Serialize `value` with two-space indentation and replace the file contents.
pub async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DocumentError> {
    let data = serde_json::to_vec_pretty(value)
        .map_err(|e| DocumentError::Malformed { path: path.display().to_string(), source: e })?;
    fs::write(path, data)
        .await
        .map_err(|e| DocumentError::Io { path: path.display().to_string(), source: e })
}

/// Create the parent directory and seed the document with `default` if it is missing.
/// Returns whether the document had to be created.
pub async fn ensure_document<T: Serialize + ?Sized>(path: &Path, default: &T) -> Result<bool, DocumentError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| DocumentError::Io { path: parent.display().to_string(), source: e })?;
    }
    if fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }
    write_document(path, default).await?;
    Ok(true)
}

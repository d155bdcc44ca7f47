//! Typed error variants for the router-tabs-store crate.
//!
//! Storage backends and tab stores return these so callers can tell an
//! unreadable medium apart from a record that failed to encode.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by storage backends and tab stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file-backed storage operation failed.
    #[error("Failed to {operation} storage file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized before writing.
    #[error("Failed to serialize value for key '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A key cannot be represented by the storage backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the store crate.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

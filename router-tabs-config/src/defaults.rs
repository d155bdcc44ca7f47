//! Default value functions used as `#[serde(default = "...")]` attributes.

use std::path::PathBuf;

pub fn store_key() -> String {
    "router-tabs".to_string()
}

pub fn bool_false() -> bool {
    false
}

/// Directory used by file-backed tab storage when none is configured.
pub fn storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("router-tabs")
}

//! Crate-level error type.

use crate::route::RouteTreeError;
use router_tabs_config::ConfigError;
use router_tabs_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterTabsError {
    /// The active tab was closed and there is nowhere to go.
    #[error(
        "Cannot leave removed tab of type '{tab_type}': no other '{tab_type}' tab is open and no fallback path is configured"
    )]
    NoRedirectTarget { tab_type: String },

    #[error("Invalid route tree: {0}")]
    RouteTree(#[from] RouteTreeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tab store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RouterTabsError>;

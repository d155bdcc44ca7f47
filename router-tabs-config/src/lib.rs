//! Configuration system for router-tabs.
//!
//! This crate provides loading, saving and validation of the files that
//! describe a tabbed navigation shell:
//!
//! - The route tree (paths, tab types, forced and eager child tabs)
//! - Engine settings (store key, fallback path, storage directory)

pub mod config;
pub mod defaults;
pub mod error;
pub mod route;

pub use config::RouterTabsConfig;
pub use error::ConfigError;
pub use route::RouteConfig;

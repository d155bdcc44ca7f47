//! Keeps a tabbed navigation shell in sync with a hierarchical route tree.
//!
//! The host feeds location changes to a [`RouterTabs`] engine. The engine
//! matches them against a [`RouteTree`](route::RouteTree), opens and focuses
//! the corresponding [`Tab`]s, persists them through a
//! [`TabStore`](router_tabs_store::TabStore), and on tab removal navigates
//! away from a closed active tab.
//!
//! Persistence lives in `router-tabs-store`, configuration files in
//! `router-tabs-config`.

/// Crate version, for the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod containment;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod route;
pub mod tab;
pub mod url;

pub use containment::{Containment, contains, equal_tabs};
pub use engine::{EngineEvent, RouterTabs, RouterTabsBuilder, TabCallback, TabEvent};
pub use error::{Result, RouterTabsError};
pub use navigation::{Location, MemoryHistory, NavigateOptions, Navigator};
pub use route::{RouteDescriptor, RouteTree};
pub use tab::{Params, Query, Tab, TabFactoryRegistry, TabIdentity, TabLifecycle};
pub use crate::url::generate_route_url;

pub use router_tabs_config as config;
pub use router_tabs_store as store;

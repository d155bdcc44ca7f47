//! Shared integration test helpers for router-tabs.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{harness, simple_routes, tab};
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use parking_lot::Mutex;
use router_tabs::navigation::MemoryHistory;
use router_tabs::route::{RouteDescriptor, RouteTree};
use router_tabs::store::{KeyedTabStore, MemoryStorage, TabRecord};
use router_tabs::{Params, Query, RouterTabs, RouterTabsBuilder, Tab};
use std::sync::Arc;

/// Store identifier used by every harness.
pub const STORE_ID: &str = "test";

/// Shared, ordered log of engine callbacks ("add user(id=1)", "focus ...").
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// Home, a users section with an index list and per-user tabs, search, and a
/// settings page without a tab.
pub fn simple_routes() -> RouteTree {
    RouteTree::new(vec![
        RouteDescriptor::new("/").with_type("home").with_plain_tab(),
        RouteDescriptor::new("/users").with_children(vec![
            RouteDescriptor::index().with_type("user-list").with_plain_tab(),
            RouteDescriptor::new(":id").with_type("user").with_plain_tab(),
        ]),
        RouteDescriptor::new("/search").with_type("search").with_plain_tab(),
        RouteDescriptor::new("/settings").with_type("settings"),
    ])
    .expect("simple route tree is valid")
}

/// Users with a forced `activity` child and eager `notes` tabs.
pub fn nested_routes() -> RouteTree {
    RouteTree::new(vec![
        RouteDescriptor::new("/users/:id")
            .with_type("user")
            .with_plain_tab()
            .initialize_types_on_add(["notes"])
            .with_children(vec![
                RouteDescriptor::new("activity")
                    .with_type("activity")
                    .with_plain_tab()
                    .force_initialization(),
                RouteDescriptor::new("profile").with_type("profile"),
            ]),
        RouteDescriptor::new("/notes/:id").with_type("notes").with_plain_tab(),
        RouteDescriptor::new("/search").with_type("search").with_plain_tab(),
    ])
    .expect("nested route tree is valid")
}

/// Engine plus handles to everything it talks to.
pub struct Harness {
    pub engine: RouterTabs,
    pub history: MemoryHistory,
    pub storage: MemoryStorage,
    pub events: EventLog,
}

impl Harness {
    /// Drain the callback log.
    pub fn take_events(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Display form of every open tab, in order.
    pub fn tab_names(&self) -> Vec<String> {
        self.engine.tabs().iter().map(ToString::to_string).collect()
    }

    pub fn active_name(&self) -> Option<String> {
        self.engine.active_tab().map(ToString::to_string)
    }

    /// Paths pushed through the navigator.
    pub fn navigations(&self) -> Vec<String> {
        self.history.entries().into_iter().map(|e| e.path).collect()
    }
}

pub fn store_over(storage: &MemoryStorage) -> KeyedTabStore<TabRecord, MemoryStorage> {
    KeyedTabStore::new(STORE_ID, storage.clone())
}

/// Harness over a fresh in-memory storage.
pub fn harness(tree: RouteTree) -> Harness {
    harness_with(tree, MemoryStorage::new(), |builder| builder)
}

/// Harness over `storage`, letting the test adjust the builder.
pub fn harness_with(
    tree: RouteTree,
    storage: MemoryStorage,
    configure: impl FnOnce(RouterTabsBuilder) -> RouterTabsBuilder,
) -> Harness {
    let history = MemoryHistory::new();
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));

    let log = |kind: &'static str| {
        let events = Arc::clone(&events);
        move |tab: &Tab| events.lock().push(format!("{} {}", kind, tab))
    };

    let builder = RouterTabs::builder(tree)
        .store(store_over(&storage))
        .navigator(history.clone())
        .on_add_tab(log("add"))
        .on_remove_tab(log("remove"))
        .on_focus_tab(log("focus"))
        .on_blur_tab(log("blur"));
    let engine = configure(builder).build();

    Harness {
        engine,
        history,
        storage,
        events,
    }
}

/// Tab with the given params and no query.
pub fn tab(tab_type: &str, params: &[(&str, &str)]) -> Tab {
    let params: Params = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Tab::new(tab_type, params, Query::new())
}

pub fn user(id: &str) -> Tab {
    tab("user", &[("id", id)])
}

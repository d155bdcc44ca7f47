//! The synchronization engine.
//!
//! [`RouterTabs`] keeps an ordered tab collection consistent with the current
//! location. Location and storage changes are processed strictly one at a
//! time through an event queue; each pass rebuilds the matched routes and
//! the [`TabHierarchy`] from scratch, then opens and focuses tabs
//! (see `sync.rs`). Closing tabs and redirecting away from a closed active
//! tab lives in `removal.rs`.

mod callbacks;
mod removal;
mod sync;

pub use callbacks::{TabCallback, TabEvent};

use crate::containment::contains;
use crate::error::Result;
use crate::navigation::{Location, MemoryHistory, NavigateOptions, Navigator};
use crate::route::{PathMatcher, PatternMatcher, RouteMatch, RouteTree, TabHierarchy, find_route_by_type};
use crate::tab::{Query, Tab, TabCollection, TabFactoryRegistry, TabIdentity};
use callbacks::TabCallbacks;
use router_tabs_config::RouterTabsConfig;
use router_tabs_store::{KeyedTabStore, MemoryStorage, StorageEvent, TabRecord, TabStore};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Input processed by the engine's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The host location changed (user navigation or engine redirect)
    LocationChanged(Location),
    /// The persisted tab list changed underneath us
    StorageChanged,
}

/// Tab-route synchronization engine.
pub struct RouterTabs {
    tree: Arc<RouteTree>,
    matcher: Box<dyn PathMatcher>,
    navigator: Box<dyn Navigator>,
    store: Box<dyn TabStore<TabRecord>>,
    fallback_path: Option<String>,
    callbacks: TabCallbacks,

    tabs: TabCollection,
    location: Location,
    query: Query,
    active_routes: Vec<RouteMatch>,
    /// Routes of the last completed synchronization pass
    last_synced: Option<Vec<RouteMatch>>,
    active_tab: Option<Tab>,
    hierarchy: TabHierarchy,

    queue: VecDeque<EngineEvent>,
    draining: bool,
    events_tx: Sender<EngineEvent>,
    events_rx: Receiver<EngineEvent>,
}

/// Builder for [`RouterTabs`].
pub struct RouterTabsBuilder {
    tree: RouteTree,
    matcher: Option<Box<dyn PathMatcher>>,
    navigator: Option<Box<dyn Navigator>>,
    store: Option<Box<dyn TabStore<TabRecord>>>,
    fallback_path: Option<String>,
    callbacks: TabCallbacks,
    initial_location: Option<Location>,
}

impl RouterTabsBuilder {
    fn new(tree: RouteTree) -> Self {
        Self {
            tree,
            matcher: None,
            navigator: None,
            store: None,
            fallback_path: None,
            callbacks: TabCallbacks::default(),
            initial_location: None,
        }
    }

    /// Route tree and fallback path from a configuration file.
    pub fn from_config(config: &RouterTabsConfig, registry: &TabFactoryRegistry) -> Result<Self> {
        let tree = RouteTree::from_config(&config.routes, registry)?;
        let mut builder = Self::new(tree);
        builder.fallback_path = config.fallback_path.clone();
        Ok(builder)
    }

    pub fn matcher(mut self, matcher: impl PathMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    pub fn store(mut self, store: impl TabStore<TabRecord> + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Where to go when the active tab closes and no sibling is open.
    pub fn fallback_path(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = Some(path.into());
        self
    }

    pub fn on_add_tab(mut self, callback: impl FnMut(&Tab) + Send + 'static) -> Self {
        self.callbacks.on_add_tab = Some(Box::new(callback));
        self
    }

    pub fn on_remove_tab(mut self, callback: impl FnMut(&Tab) + Send + 'static) -> Self {
        self.callbacks.on_remove_tab = Some(Box::new(callback));
        self
    }

    pub fn on_focus_tab(mut self, callback: impl FnMut(&Tab) + Send + 'static) -> Self {
        self.callbacks.on_focus_tab = Some(Box::new(callback));
        self
    }

    pub fn on_blur_tab(mut self, callback: impl FnMut(&Tab) + Send + 'static) -> Self {
        self.callbacks.on_blur_tab = Some(Box::new(callback));
        self
    }

    /// Synchronize against this location as soon as the engine is built.
    pub fn initial_location(mut self, location: impl Into<Location>) -> Self {
        self.initial_location = Some(location.into());
        self
    }

    /// Hydrate the tab collection from the store and return the engine.
    pub fn build(self) -> RouterTabs {
        let tree = Arc::new(self.tree);
        let store = self.store.unwrap_or_else(|| {
            Box::new(KeyedTabStore::<TabRecord, _>::new(
                RouterTabsConfig::default().store_key,
                MemoryStorage::new(),
            ))
        });
        let tabs = hydrate(&tree, store.get());
        log::info!("Hydrated {} tabs from store", tabs.len());

        let (events_tx, events_rx) = channel();
        let mut engine = RouterTabs {
            tree,
            matcher: self.matcher.unwrap_or_else(|| Box::new(PatternMatcher::new())),
            navigator: self.navigator.unwrap_or_else(|| Box::new(MemoryHistory::new())),
            store,
            fallback_path: self.fallback_path,
            callbacks: self.callbacks,
            tabs,
            location: Location::default(),
            query: Query::new(),
            active_routes: Vec::new(),
            last_synced: None,
            active_tab: None,
            hierarchy: TabHierarchy::default(),
            queue: VecDeque::new(),
            draining: false,
            events_tx,
            events_rx,
        };
        if let Some(location) = self.initial_location {
            engine.location_changed(location);
        }
        engine
    }
}

/// Rebuild live tabs from stored records. Records whose type has no
/// tab-bearing route are dropped.
fn hydrate(tree: &RouteTree, records: Vec<TabRecord>) -> TabCollection {
    let mut tabs = Vec::with_capacity(records.len());
    for record in records {
        match find_route_by_type(tree, &record.tab_type).and_then(|node| node.tab_factory()) {
            Some(factory) => tabs.push(factory(&record.params, &record.query)),
            None => log::warn!(
                "Route not found for stored tab of type '{}', dropping it",
                record.tab_type
            ),
        }
    }
    TabCollection::from_tabs(tabs)
}

impl RouterTabs {
    pub fn builder(tree: RouteTree) -> RouterTabsBuilder {
        RouterTabsBuilder::new(tree)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Process a location change.
    pub fn location_changed(&mut self, location: impl Into<Location>) {
        self.dispatch(EngineEvent::LocationChanged(location.into()));
    }

    /// Reload the tab collection from the store (another context wrote it).
    pub fn storage_changed(&mut self) {
        self.dispatch(EngineEvent::StorageChanged);
    }

    /// Forward a storage event; ignored unless it concerns this engine's store.
    /// Returns true if the tab collection was reloaded.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> bool {
        if !self.store.owns_key(&event.key) {
            return false;
        }
        self.storage_changed();
        true
    }

    /// Sender for posting events from other threads (storage watchers,
    /// host routers). Posted events run on the next [`Self::process_pending`].
    pub fn event_sender(&self) -> Sender<EngineEvent> {
        self.events_tx.clone()
    }

    /// Run every event posted through [`Self::event_sender`].
    /// Returns the number of events processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    fn dispatch(&mut self, event: EngineEvent) {
        self.queue.push_back(event);
        if self.draining {
            debug_trace!("SYNC", "Queued event behind running pass ({} waiting)", self.queue.len());
            return;
        }
        self.draining = true;
        while let Some(event) = self.queue.pop_front() {
            match event {
                EngineEvent::LocationChanged(location) => self.apply_location(location),
                EngineEvent::StorageChanged => self.reload_from_store(),
            }
        }
        self.draining = false;
    }

    fn reload_from_store(&mut self) {
        self.tabs = hydrate(&self.tree, self.store.get());
        debug_info!("STORE", "Reloaded {} tabs after storage change", self.tabs.len());
    }

    /// Push (or replace) `path` through the navigator and synchronize to it.
    fn navigate_to(&mut self, path: &str, options: NavigateOptions) {
        debug_info!("SYNC", "Navigating to {} (replace={})", path, options.replace);
        self.navigator.navigate(path, options);
        self.dispatch(EngineEvent::LocationChanged(Location::parse(path)));
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(&self.tabs.records()) {
            log::error!("Failed to persist {} tabs: {}", self.tabs.len(), e);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Open tabs in display order.
    pub fn tabs(&self) -> &[Tab] {
        self.tabs.as_slice()
    }

    /// Open tabs whose type is one of `types`.
    pub fn tabs_of_types(&self, types: &[&str]) -> Vec<&Tab> {
        self.tabs.of_types(types)
    }

    /// The focused tab: innermost tab-bearing route of the current location.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab.as_ref()
    }

    /// Matches for the current location, outermost first.
    pub fn active_routes(&self) -> &[RouteMatch] {
        &self.active_routes
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn hierarchy(&self) -> &TabHierarchy {
        &self.hierarchy
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn fallback_path(&self) -> Option<&str> {
        self.fallback_path.as_deref()
    }

    /// Whether `tab` belongs to the current location: some matched
    /// tab-bearing route has its type, its params are contained in the
    /// match's params and its query in the current query.
    pub fn is_tab_active<T: TabIdentity + ?Sized>(&self, tab: &T) -> bool {
        self.active_routes.iter().any(|m| {
            let node = self.tree.node(m.route);
            node.has_tab()
                && node.route_type() == Some(tab.tab_type())
                && contains(tab.params(), &m.params)
                && contains(tab.query(), &self.query)
        })
    }

    /// Most recently focused tab, if it is still routable.
    pub fn last_focused_tab(&self) -> Option<Tab> {
        let record = self.store.get_last_focus_tab()?;
        hydrate(&self.tree, vec![record]).iter().next().cloned()
    }

    /// Navigate to the most recently focused tab. Returns true if navigation
    /// happened.
    pub fn restore_last_focused(&mut self) -> bool {
        match self.last_focused_tab() {
            Some(tab) => self.change(&tab),
            None => false,
        }
    }

    /// Reorder an open tab. Returns true if the tab moved.
    pub fn move_tab<T: TabIdentity + ?Sized>(&mut self, tab: &T, target_index: usize) -> bool {
        let moved = self.tabs.move_to_index(tab, target_index);
        if moved {
            self.persist();
        }
        moved
    }
}

impl fmt::Debug for RouterTabs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterTabs")
            .field("routes", &self.tree.len())
            .field("location", &self.location)
            .field("tabs", &self.tabs)
            .field("active_tab", &self.active_tab)
            .field("fallback_path", &self.fallback_path)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

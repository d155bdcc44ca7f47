//! Location-driven synchronization.
//!
//! One pass per location change:
//! 1. match the pathname and rebuild the tab hierarchy
//! 2. stop if route types and params equal the last completed pass; a
//!    navigation that only changes the query opens nothing
//! 3. for every matched route: open forced children (recursively), open the
//!    route's own tab, open its `initialize_types_on_add` tabs
//! 4. focus the innermost matched tab if it differs from the active one

use super::RouterTabs;
use super::callbacks::TabEvent;
use crate::containment::equal_tabs;
use crate::navigation::Location;
use crate::route::{RouteId, RouteMatch, RouteNode, RouteTree, TabHierarchy, find_route_by_type};
use crate::tab::{Params, Tab};
use std::sync::Arc;

/// Same route types with the same params, level by level.
fn routes_equal(tree: &RouteTree, a: &[RouteMatch], b: &[RouteMatch]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            tree.node(x.route).route_type() == tree.node(y.route).route_type()
                && x.params == y.params
        })
}

impl RouterTabs {
    pub(super) fn apply_location(&mut self, location: Location) {
        let matches = self.matcher.match_routes(&self.tree, &location.pathname);
        self.query = location.query();
        self.location = location;
        self.hierarchy = TabHierarchy::build(&self.tree, &matches, &self.query);
        self.active_routes = matches;

        if let Some(routes) = &self.last_synced
            && routes_equal(&self.tree, routes, &self.active_routes)
        {
            debug_trace!("SYNC", "Routes unchanged for {}, skipping pass", self.location);
            return;
        }

        self.synchronize();
        self.last_synced = Some(self.active_routes.clone());
    }

    fn synchronize(&mut self) {
        let entries: Vec<(RouteId, Params)> = self
            .active_routes
            .iter()
            .map(|m| (m.route, m.params.clone()))
            .collect();
        debug_log!(
            "SYNC",
            "Synchronizing {} matched routes for {}",
            entries.len(),
            self.location
        );

        for (route, params) in &entries {
            self.initialize_route(*route, params);
        }
        self.update_active_tab();
    }

    fn initialize_route(&mut self, route: RouteId, params: &Params) {
        let tree = Arc::clone(&self.tree);
        let node = tree.node(route);

        for &child in node.children() {
            let child_node = tree.node(child);
            if child_node.force_initialization() && child_node.has_tab() {
                self.initialize_route(child, params);
            }
        }

        let Some(factory) = node.tab_factory() else {
            return;
        };
        let tab = factory(params, &self.query);
        self.add_tab(tab);

        for eager in node.initialize_types_on_add() {
            let Some(eager_factory) = find_route_by_type(&tree, eager).and_then(RouteNode::tab_factory)
            else {
                debug_log!("SYNC", "No tab route for eager type '{}'", eager);
                continue;
            };
            let tab = eager_factory(params, &self.query);
            self.add_tab(tab);
        }
    }

    /// Append `tab` unless it is already open. Returns true if it was added.
    pub(super) fn add_tab(&mut self, tab: Tab) -> bool {
        if self.tabs.contains_exact(&tab) {
            debug_trace!("SYNC", "Tab {} already open", tab);
            return false;
        }
        log::info!("Opened tab {} (total: {})", tab, self.tabs.len() + 1);
        self.callbacks.emit(TabEvent::Added, &tab);
        self.tabs.add(tab);
        self.persist();
        true
    }

    fn update_active_tab(&mut self) {
        let next = self.hierarchy.innermost().map(|entry| {
            // Prefer the open instance so its hooks fire
            self.tabs
                .find_exact(&entry.tab)
                .cloned()
                .unwrap_or_else(|| entry.tab.clone())
        });
        self.set_active_tab(next);
    }

    /// Make `next` the active tab, blurring the previous one. Nothing fires
    /// when the identity is unchanged.
    pub(super) fn set_active_tab(&mut self, next: Option<Tab>) {
        let unchanged = match (&self.active_tab, &next) {
            (Some(current), Some(next)) => equal_tabs(current, next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        if let Some(previous) = self.active_tab.take() {
            self.callbacks.emit(TabEvent::Blurred, &previous);
        }
        if let Some(tab) = next {
            log::info!("Focused tab {}", tab);
            self.callbacks.emit(TabEvent::Focused, &tab);
            if let Err(e) = self.store.set_last_focus_tab(&tab.to_record()) {
                log::error!("Failed to record last focused tab {}: {}", tab, e);
            }
            self.active_tab = Some(tab);
        }
    }
}

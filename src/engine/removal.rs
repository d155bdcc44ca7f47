//! Closing tabs and navigating between them.

use super::RouterTabs;
use super::callbacks::TabEvent;
use crate::error::{Result, RouterTabsError};
use crate::navigation::NavigateOptions;
use crate::route::find_route_by_type;
use crate::tab::TabIdentity;
use crate::url::generate_route_url;

impl RouterTabs {
    /// Close `tab` and every tab related to it.
    ///
    /// Unknown tabs are ignored. If the active tab is among the closed ones
    /// the engine navigates to the first remaining tab of the same type, else
    /// to the fallback path. With neither available the tabs stay closed and
    /// [`RouterTabsError::NoRedirectTarget`] is returned.
    pub fn remove<T: TabIdentity + ?Sized>(&mut self, tab: &T) -> Result<()> {
        let Some(removed) = self.tabs.find_exact(tab).cloned() else {
            debug_log!("REMOVE", "Tab of type '{}' is not open, nothing to close", tab.tab_type());
            return Ok(());
        };

        let evicted = self.tabs.evict(&removed);
        log::info!(
            "Closed tab {} ({} evicted, {} remaining)",
            removed,
            evicted.len(),
            self.tabs.len()
        );
        self.persist();
        for tab in &evicted {
            self.callbacks.emit(TabEvent::Removed, tab);
        }

        let active_closed = self
            .active_tab
            .as_ref()
            .is_some_and(|active| !self.tabs.contains_exact(active));
        if !active_closed {
            return Ok(());
        }
        // Closed tabs are not blurred
        self.active_tab = None;
        // The redirect must synchronize even when it lands on the same routes
        self.last_synced = None;

        if let Some(sibling) = self.tabs.first_of_type(removed.tab_type()).cloned() {
            debug_info!("REMOVE", "Active tab closed, switching to {}", sibling);
            self.change(&sibling);
            return Ok(());
        }

        if let Some(fallback) = self.fallback_path.clone() {
            debug_info!("REMOVE", "Active tab closed, falling back to {}", fallback);
            self.navigate_to(&fallback, NavigateOptions::default());
            return Ok(());
        }

        debug_error!("REMOVE", "No redirect target after closing {}", removed);
        Err(RouterTabsError::NoRedirectTarget {
            tab_type: removed.tab_type().to_string(),
        })
    }

    /// Navigate to `tab`'s route. Returns false (and logs) if the tab's type
    /// has no route or the route has no path.
    ///
    /// An open tab is focused before navigating, so tabs that differ from
    /// the current one only by query are reachable.
    pub fn change<T: TabIdentity + ?Sized>(&mut self, tab: &T) -> bool {
        let Some(node) = find_route_by_type(&self.tree, tab.tab_type()) else {
            log::warn!("Route not found for tab type '{}'", tab.tab_type());
            return false;
        };
        let Some(pattern) = node.full_path() else {
            log::warn!("Route for tab type '{}' has no path", tab.tab_type());
            return false;
        };
        let url = generate_route_url(pattern, tab.params(), tab.query());
        if let Some(open) = self.tabs.find_exact(tab).cloned() {
            self.set_active_tab(Some(open));
        }
        self.navigate_to(&url, NavigateOptions::default());
        true
    }
}

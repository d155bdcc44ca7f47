//! Ordered collection of open tabs.

use super::{Tab, TabIdentity};
use crate::containment::{equal_tabs, is_related_tab};
use router_tabs_store::TabRecord;

/// All open tabs, in display order. Never holds two equal tabs when filled
/// through [`TabCollection::add`].
#[derive(Debug, Clone, Default)]
pub struct TabCollection {
    tabs: Vec<Tab>,
}

impl TabCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap tabs as-is (hydration keeps whatever order the store had)
    pub fn from_tabs(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    pub fn as_slice(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Index of the tab structurally equal to `tab`
    pub fn position_exact<T: TabIdentity + ?Sized>(&self, tab: &T) -> Option<usize> {
        self.tabs.iter().position(|t| equal_tabs(t, tab))
    }

    /// The stored tab structurally equal to `tab`
    pub fn find_exact<T: TabIdentity + ?Sized>(&self, tab: &T) -> Option<&Tab> {
        self.position_exact(tab).map(|idx| &self.tabs[idx])
    }

    pub fn contains_exact<T: TabIdentity + ?Sized>(&self, tab: &T) -> bool {
        self.position_exact(tab).is_some()
    }

    /// Append `tab` unless an equal tab is already open.
    /// Returns true if the tab was added
    pub fn add(&mut self, tab: Tab) -> bool {
        if self.contains_exact(&tab) {
            return false;
        }
        self.tabs.push(tab);
        true
    }

    /// Remove the tab equal to `removed` together with every related tab
    /// (see [`is_related_tab`]). Returns the evicted tabs in display order.
    pub fn evict(&mut self, removed: &Tab) -> Vec<Tab> {
        let (evicted, kept): (Vec<Tab>, Vec<Tab>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .partition(|t| equal_tabs(t, removed) || is_related_tab(t, removed));
        self.tabs = kept;
        evicted
    }

    /// First open tab of `tab_type`
    pub fn first_of_type(&self, tab_type: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.tab_type() == tab_type)
    }

    /// Open tabs whose type is one of `types`, in display order
    pub fn of_types(&self, types: &[&str]) -> Vec<&Tab> {
        self.tabs
            .iter()
            .filter(|t| types.contains(&t.tab_type()))
            .collect()
    }

    /// Move a tab to a specific index (tab-bar drag-and-drop reordering)
    /// Returns true if the tab was actually moved, false if not found or already at target
    pub fn move_to_index<T: TabIdentity + ?Sized>(&mut self, tab: &T, target_index: usize) -> bool {
        let current_idx = match self.position_exact(tab) {
            Some(idx) => idx,
            None => return false,
        };

        let clamped_target = target_index.min(self.tabs.len().saturating_sub(1));
        if clamped_target == current_idx {
            return false;
        }

        let moved = self.tabs.remove(current_idx);
        log::debug!(
            "Moved tab {} from index {} to {}",
            moved,
            current_idx,
            clamped_target
        );
        self.tabs.insert(clamped_target, moved);
        true
    }

    /// Persisted form of every tab
    pub fn records(&self) -> Vec<TabRecord> {
        self.tabs.iter().map(Tab::to_record).collect()
    }
}

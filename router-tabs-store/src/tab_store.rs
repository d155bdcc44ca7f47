//! Tab stores: the persistence boundary of the synchronization engine.
//!
//! A [`TabStore`] loads and saves the ordered tab list and the last focused
//! tab. [`KeyedTabStore`] implements it on top of any [`KeyValueStorage`],
//! namespacing its two records under a caller-supplied identifier:
//!
//! - `"{identifier}:router-tabs"`: JSON array of records
//! - `"{identifier}:router-tabs:last-focus-tab"`: JSON record

use crate::error::{StoreError, StoreResult};
use crate::record::TabRecord;
use crate::storage::KeyValueStorage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const TABS_SUFFIX: &str = ":router-tabs";
const LAST_FOCUS_SUFFIX: &str = ":router-tabs:last-focus-tab";

/// Load/save contract for the tab list and last focused tab.
pub trait TabStore<T>: Send + Sync {
    /// Stored tabs. Never fails: unreadable state yields the default set.
    fn get(&self) -> Vec<T>;

    /// Replace the stored tab list.
    fn set(&self, tabs: &[T]) -> StoreResult<()>;

    /// Remember the most recently focused tab.
    fn set_last_focus_tab(&self, tab: &T) -> StoreResult<()>;

    /// Most recently focused tab, if one was recorded and is readable.
    fn get_last_focus_tab(&self) -> Option<T>;

    /// Whether a storage change on `key` concerns this store.
    fn owns_key(&self, key: &str) -> bool {
        let _ = key;
        true
    }
}

type DefaultTabs<T> = Arc<dyn Fn() -> Vec<T> + Send + Sync>;

/// [`TabStore`] backed by a [`KeyValueStorage`] under one identifier.
pub struct KeyedTabStore<T, S> {
    identifier: String,
    storage: S,
    default_tabs: Option<DefaultTabs<T>>,
}

impl<T, S: std::fmt::Debug> std::fmt::Debug for KeyedTabStore<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedTabStore")
            .field("identifier", &self.identifier)
            .field("storage", &self.storage)
            .field("has_default_tabs", &self.default_tabs.is_some())
            .finish()
    }
}

impl<T, S> KeyedTabStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    /// Create a store for `identifier` over `storage`.
    pub fn new(identifier: impl Into<String>, storage: S) -> Self {
        Self {
            identifier: identifier.into(),
            storage,
            default_tabs: None,
        }
    }

    /// Seed the tab list with `default_tabs()` the first time it is read.
    pub fn with_default_tabs<F>(mut self, default_tabs: F) -> Self
    where
        F: Fn() -> Vec<T> + Send + Sync + 'static,
    {
        self.default_tabs = Some(Arc::new(default_tabs));
        self
    }

    /// Namespace identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Underlying storage medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Key holding the tab list.
    pub fn tabs_key(&self) -> String {
        format!("{}{}", self.identifier, TABS_SUFFIX)
    }

    /// Key holding the last focused tab.
    pub fn last_focus_key(&self) -> String {
        format!("{}{}", self.identifier, LAST_FOCUS_SUFFIX)
    }

    /// Remove both records of this store.
    pub fn destroy(&self) -> StoreResult<()> {
        self.storage.remove_item(&self.tabs_key())?;
        self.storage.remove_item(&self.last_focus_key())?;
        log::info!("Destroyed tab store '{}'", self.identifier);
        Ok(())
    }

    /// Remove every storage key containing `pattern`.
    ///
    /// Iterates a snapshot of the key list, so keys disappearing underneath
    /// (another context clearing them) are skipped rather than re-scanned.
    /// Returns the number of keys removed.
    pub fn destroy_by_pattern(&self, pattern: &str) -> StoreResult<usize> {
        let snapshot = self.storage.keys()?;
        let mut removed = 0;
        for key in snapshot.iter().filter(|key| key.contains(pattern)) {
            self.storage.remove_item(key)?;
            removed += 1;
        }
        log::info!(
            "Destroyed {} storage keys matching pattern '{}'",
            removed,
            pattern
        );
        Ok(removed)
    }

    fn default_set(&self) -> Vec<T> {
        self.default_tabs
            .as_ref()
            .map(|default_tabs| default_tabs())
            .unwrap_or_default()
    }

    fn write_json<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.storage.set_item(key, &json)
    }
}

impl<S: KeyValueStorage> KeyedTabStore<TabRecord, S> {
    /// Append `record` unless an identical record is already stored.
    ///
    /// Returns `true` when the record was added.
    pub fn add(&self, record: TabRecord) -> StoreResult<bool> {
        let mut tabs = self.get();
        if tabs.contains(&record) {
            return Ok(false);
        }
        tabs.push(record);
        self.set(&tabs)?;
        Ok(true)
    }
}

impl<T, S> TabStore<T> for KeyedTabStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    fn get(&self) -> Vec<T> {
        let key = self.tabs_key();
        let stored = match self.storage.get_item(&key) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Failed to read tab store '{}': {}", self.identifier, e);
                return self.default_set();
            }
        };

        match stored {
            Some(json) => match serde_json::from_str::<Vec<T>>(&json) {
                Ok(tabs) => tabs,
                Err(e) => {
                    log::warn!(
                        "Corrupt tab list in store '{}', using defaults: {}",
                        self.identifier,
                        e
                    );
                    self.default_set()
                }
            },
            None => {
                let Some(default_tabs) = self.default_tabs.as_ref() else {
                    return Vec::new();
                };
                let tabs = default_tabs();
                // Persist the seed so later reads are stable
                if let Err(e) = self.set(&tabs) {
                    log::error!(
                        "Failed to persist default tabs for store '{}': {}",
                        self.identifier,
                        e
                    );
                }
                tabs
            }
        }
    }

    fn set(&self, tabs: &[T]) -> StoreResult<()> {
        self.write_json(&self.tabs_key(), tabs)
    }

    fn set_last_focus_tab(&self, tab: &T) -> StoreResult<()> {
        self.write_json(&self.last_focus_key(), tab)
    }

    fn get_last_focus_tab(&self) -> Option<T> {
        let json = match self.storage.get_item(&self.last_focus_key()) {
            Ok(json) => json?,
            Err(e) => {
                log::warn!(
                    "Failed to read last focused tab for store '{}': {}",
                    self.identifier,
                    e
                );
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(tab) => Some(tab),
            Err(e) => {
                log::warn!(
                    "Corrupt last focused tab in store '{}': {}",
                    self.identifier,
                    e
                );
                None
            }
        }
    }

    fn owns_key(&self, key: &str) -> bool {
        key == self.tabs_key() || key == self.last_focus_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> KeyedTabStore<TabRecord, MemoryStorage> {
        KeyedTabStore::new("ws", MemoryStorage::new())
    }

    #[test]
    fn test_empty_store_without_defaults() {
        let store = store();
        assert!(store.get().is_empty());
        // Nothing seeded, nothing written
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_defaults_are_seeded_and_persisted() {
        let store = store().with_default_tabs(|| vec![TabRecord::new("home")]);
        assert_eq!(store.get(), vec![TabRecord::new("home")]);
        assert_eq!(
            store.storage().get_item("ws:router-tabs").unwrap().as_deref(),
            Some(r#"[{"type":"home","params":{},"query":{}}]"#)
        );
    }

    #[test]
    fn test_stored_value_wins_over_defaults() {
        let store = store().with_default_tabs(|| vec![TabRecord::new("home")]);
        store.set(&[TabRecord::new("inbox")]).unwrap();
        assert_eq!(store.get(), vec![TabRecord::new("inbox")]);
    }

    #[test]
    fn test_corrupt_list_falls_back_to_defaults() {
        let store = store().with_default_tabs(|| vec![TabRecord::new("home")]);
        store
            .storage()
            .set_item("ws:router-tabs", "{not json")
            .unwrap();
        assert_eq!(store.get(), vec![TabRecord::new("home")]);
    }

    #[test]
    fn test_last_focus_tab() {
        let store = store();
        assert!(store.get_last_focus_tab().is_none());

        let tab = TabRecord::new("user").with_param("id", "3");
        store.set_last_focus_tab(&tab).unwrap();
        assert_eq!(store.get_last_focus_tab(), Some(tab));

        store
            .storage()
            .set_item("ws:router-tabs:last-focus-tab", "garbage")
            .unwrap();
        assert!(store.get_last_focus_tab().is_none());
    }

    #[test]
    fn test_add_deduplicates() {
        let store = store();
        let tab = TabRecord::new("user").with_param("id", "1");
        assert!(store.add(tab.clone()).unwrap());
        assert!(!store.add(tab).unwrap());
        assert_eq!(store.get().len(), 1);
    }

    #[test]
    fn test_destroy_removes_both_records() {
        let store = store();
        store.set(&[TabRecord::new("home")]).unwrap();
        store.set_last_focus_tab(&TabRecord::new("home")).unwrap();
        store.destroy().unwrap();
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_destroy_by_pattern_only_touches_matches() {
        let storage = MemoryStorage::new();
        let a: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("project-1", storage.clone());
        let b: KeyedTabStore<TabRecord, _> = KeyedTabStore::new("project-2", storage.clone());
        a.set(&[TabRecord::new("home")]).unwrap();
        a.set_last_focus_tab(&TabRecord::new("home")).unwrap();
        b.set(&[TabRecord::new("home")]).unwrap();
        storage.set_item("unrelated", "1").unwrap();

        assert_eq!(a.destroy_by_pattern("project-1").unwrap(), 2);
        assert_eq!(
            storage.keys().unwrap(),
            vec!["project-2:router-tabs".to_string(), "unrelated".to_string()]
        );
    }

    #[test]
    fn test_owns_key() {
        let store = store();
        assert!(store.owns_key("ws:router-tabs"));
        assert!(store.owns_key("ws:router-tabs:last-focus-tab"));
        assert!(!store.owns_key("other:router-tabs"));
    }
}

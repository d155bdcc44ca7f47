//! In-process storage backend.

use super::{KeyValueStorage, StorageEvent, Subscribers};
use crate::error::StoreResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// Thread-safe in-memory key-value storage.
///
/// Cloning a `MemoryStorage` yields a handle to the same map, so two engines
/// built on clones behave like two browsing contexts sharing one storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
    subscribers: Arc<Subscribers>,
}

impl MemoryStorage {
    /// Create an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items.lock().insert(key.to_string(), value.to_string());
        self.subscribers.notify(StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        });
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let removed = self.items.lock().remove(key).is_some();
        if removed {
            self.subscribers.notify(StorageEvent {
                key: key.to_string(),
                new_value: None,
            });
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.items.lock().keys().cloned().collect())
    }

    fn subscribe(&self) -> Receiver<StorageEvent> {
        self.subscribers.subscribe()
    }
}

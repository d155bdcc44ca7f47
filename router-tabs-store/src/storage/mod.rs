//! Key-value storage backends.
//!
//! Tab stores sit on top of a [`KeyValueStorage`]: a flat string-to-string
//! medium with change notifications. Two backends ship with the crate:
//!
//! - [`MemoryStorage`]: in-process map; clones share state
//! - [`FileStorage`]: one JSON file per key inside a directory

pub(crate) mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StoreResult;
use parking_lot::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Notification that a storage key was written or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed
    pub key: String,
    /// New value, `None` when the key was removed or the value is unknown
    pub new_value: Option<String>,
}

/// Flat string storage with change notifications.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// Snapshot of all keys currently stored.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Subscribe to change notifications for every key.
    fn subscribe(&self) -> Receiver<StorageEvent>;
}

/// Fan-out list of change subscribers shared by the backends.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Mutex<Vec<Sender<StorageEvent>>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&self) -> Receiver<StorageEvent> {
        let (tx, rx) = channel();
        self.senders.lock().push(tx);
        rx
    }

    /// Send `event` to every live subscriber, dropping disconnected ones.
    pub(crate) fn notify(&self, event: StorageEvent) {
        let mut senders = self.senders.lock();
        senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

//! Tab persistence for router-tabs.
//!
//! This crate owns everything the synchronization engine needs to keep its
//! tab list across reloads:
//!
//! - [`TabRecord`]: the serialized `{type, params, query}` tab identity
//! - [`KeyValueStorage`] backends ([`MemoryStorage`], [`FileStorage`])
//! - [`TabStore`] and its storage-backed implementation [`KeyedTabStore`]
//! - [`StorageWatcher`] for change events written by other processes

pub mod error;
pub mod record;
pub mod storage;
pub mod tab_store;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use error::{StoreError, StoreResult};
pub use record::{ParamMap, TabRecord};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageEvent};
pub use tab_store::{KeyedTabStore, TabStore};
#[cfg(feature = "watcher")]
pub use watcher::StorageWatcher;

//! Storage directory watcher for cross-process change events.
//!
//! [`FileStorage`](crate::FileStorage) notifies in-process subscribers on its
//! own writes. Writes made by another process (a second window sharing the
//! same store directory) are only visible through the file system, so this
//! watcher turns them into [`StorageEvent`]s. Events are debounced per key.

use crate::storage::StorageEvent;
use crate::storage::file::key_from_path;
use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// Watches a storage directory and reports changed keys.
pub struct StorageWatcher {
    /// The file system watcher (kept alive to maintain watching).
    _watcher: Box<dyn Watcher + Send>,
    /// Receiver for storage change events.
    event_receiver: Receiver<StorageEvent>,
}

impl std::fmt::Debug for StorageWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageWatcher").finish_non_exhaustive()
    }
}

/// Build the event-handler closure shared by both watcher backends.
fn make_event_handler(
    debounce_delay: Duration,
    tx: Sender<StorageEvent>,
    last_event_times: Arc<Mutex<HashMap<String, Instant>>>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result: std::result::Result<Event, notify::Error>| {
        let Ok(event) = result else {
            return;
        };

        // Create covers the rename half of an atomic save
        if !matches!(
            event.kind,
            notify::EventKind::Modify(_) | notify::EventKind::Create(_) | notify::EventKind::Remove(_)
        ) {
            return;
        }

        for path in &event.paths {
            let Some(key) = key_from_path(path) else {
                continue;
            };

            let should_send = {
                let now = Instant::now();
                let mut last = last_event_times.lock();
                match last.get(&key) {
                    Some(last_time) if now.duration_since(*last_time) < debounce_delay => {
                        log::trace!("Debouncing storage event for key {}", key);
                        false
                    }
                    _ => {
                        last.insert(key.clone(), now);
                        true
                    }
                }
            };

            if should_send {
                log::debug!("Storage key changed on disk: {}", key);
                if let Err(e) = tx.send(StorageEvent {
                    key,
                    new_value: None,
                }) {
                    log::error!("Failed to send storage change event: {}", e);
                }
            }
        }
    }
}

impl StorageWatcher {
    /// Create a watcher over `dir`.
    ///
    /// Uses the platform's native watcher and falls back to a `PollWatcher`
    /// checking every 500 ms when the native backend cannot start.
    ///
    /// # Errors
    /// Returns an error if the directory doesn't exist or watching fails on
    /// both backends.
    pub fn new(dir: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Storage directory not found: {}", dir.display());
        }

        let canonical: PathBuf = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let (tx, rx) = channel::<StorageEvent>();
        let debounce_delay = Duration::from_millis(debounce_delay_ms);
        let last_event_times = Arc::new(Mutex::new(HashMap::new()));

        let mut watcher = Self::create_watcher(debounce_delay, tx, last_event_times)?;
        watcher
            .watch(&canonical, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch storage directory: {}", canonical.display()))?;

        log::info!("Watching tab storage directory {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
        })
    }

    fn create_watcher(
        debounce_delay: Duration,
        tx: Sender<StorageEvent>,
        last_event_times: Arc<Mutex<HashMap<String, Instant>>>,
    ) -> Result<Box<dyn Watcher + Send>> {
        let handler = make_event_handler(debounce_delay, tx.clone(), Arc::clone(&last_event_times));

        match notify::recommended_watcher(handler) {
            Ok(w) => {
                log::debug!("Storage watcher: using native (RecommendedWatcher) backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Storage watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let fallback_handler = make_event_handler(debounce_delay, tx, last_event_times);
                let poll_watcher = PollWatcher::new(
                    fallback_handler,
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll_watcher))
            }
        }
    }

    /// Next pending change event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<StorageEvent> {
        self.event_receiver.try_recv().ok()
    }
}

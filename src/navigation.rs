//! Locations and the navigation boundary.

use crate::tab::Query;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A location: pathname plus raw query string (without the `?`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    pub search: String,
}

impl Location {
    /// Parse `"/path?query#fragment"`. The fragment is dropped and an empty
    /// pathname becomes `/`.
    pub fn parse(href: &str) -> Self {
        let without_fragment = href.split_once('#').map_or(href, |(before, _)| before);
        let (pathname, search) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        let pathname = if pathname.is_empty() {
            "/".to_string()
        } else {
            pathname.to_string()
        };
        Self {
            pathname,
            search: search.to_string(),
        }
    }

    /// Decoded query parameters. A repeated key keeps its last value.
    pub fn query(&self) -> Query {
        url::form_urlencoded::parse(self.search.as_bytes())
            .into_owned()
            .collect()
    }

    /// Pathname and query joined back together.
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, self.search)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl From<&str> for Location {
    fn from(href: &str) -> Self {
        Self::parse(href)
    }
}

/// How a navigation updates history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Replace the current entry instead of pushing a new one
    pub replace: bool,
}

/// Host navigation facility (browser history, app router, ...).
pub trait Navigator: Send {
    fn navigate(&mut self, path: &str, options: NavigateOptions);
}

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
    pub replace: bool,
}

/// In-memory [`Navigator`] recording every navigation.
///
/// Clones share the same history, so a handle kept by the caller observes
/// navigations made through the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    /// Path of the most recent navigation.
    pub fn current(&self) -> Option<String> {
        self.entries.lock().last().map(|entry| entry.path.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&mut self, path: &str, options: NavigateOptions) {
        let mut entries = self.entries.lock();
        let entry = HistoryEntry {
            path: path.to_string(),
            replace: options.replace,
        };
        if options.replace && !entries.is_empty() {
            let last = entries.len() - 1;
            entries[last] = entry;
        } else {
            entries.push(entry);
        }
    }
}

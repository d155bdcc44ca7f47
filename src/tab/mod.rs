//! Tabs: the `{type, params, query}` identity plus optional lifecycle hooks.
//!
//! Tabs are plain values. Identity is structural (see
//! [`crate::containment::equal_tabs`]), so two independently constructed tabs
//! for the same route and arguments are the same tab.

mod collection;
mod factory;

pub use collection::TabCollection;
pub use factory::{TabFactory, TabFactoryRegistry, plain_factory};

use router_tabs_store::{ParamMap, TabRecord};
use std::fmt;
use std::sync::Arc;

/// Path parameters captured by a route match.
pub type Params = ParamMap;

/// Query-string parameters of the current location.
pub type Query = ParamMap;

/// Read access to a tab's identity, shared by [`Tab`] and [`TabRecord`].
pub trait TabIdentity {
    fn tab_type(&self) -> &str;
    fn params(&self) -> &Params;
    fn query(&self) -> &Query;
}

impl TabIdentity for TabRecord {
    fn tab_type(&self) -> &str {
        &self.tab_type
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn query(&self) -> &Query {
        &self.query
    }
}

/// Hooks invoked on a tab as the engine adds, removes, focuses and blurs it.
///
/// All methods default to no-ops.
pub trait TabLifecycle: Send + Sync {
    fn on_add(&self, _tab: &Tab) {}
    fn on_remove(&self, _tab: &Tab) {}
    fn on_focus(&self, _tab: &Tab) {}
    fn on_blur(&self, _tab: &Tab) {}
}

/// One open tab.
#[derive(Clone)]
pub struct Tab {
    tab_type: String,
    params: Params,
    query: Query,
    lifecycle: Option<Arc<dyn TabLifecycle>>,
}

impl Tab {
    /// Create a tab without lifecycle hooks.
    pub fn new(tab_type: impl Into<String>, params: Params, query: Query) -> Self {
        Self {
            tab_type: tab_type.into(),
            params,
            query,
            lifecycle: None,
        }
    }

    /// Attach lifecycle hooks.
    pub fn with_lifecycle(mut self, lifecycle: Arc<dyn TabLifecycle>) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Convenience builder for tests and defaults.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Persisted form.
    pub fn to_record(&self) -> TabRecord {
        TabRecord {
            tab_type: self.tab_type.clone(),
            params: self.params.clone(),
            query: self.query.clone(),
        }
    }

    pub(crate) fn notify_add(&self) {
        if let Some(lifecycle) = &self.lifecycle {
            lifecycle.on_add(self);
        }
    }

    pub(crate) fn notify_remove(&self) {
        if let Some(lifecycle) = &self.lifecycle {
            lifecycle.on_remove(self);
        }
    }

    pub(crate) fn notify_focus(&self) {
        if let Some(lifecycle) = &self.lifecycle {
            lifecycle.on_focus(self);
        }
    }

    pub(crate) fn notify_blur(&self) {
        if let Some(lifecycle) = &self.lifecycle {
            lifecycle.on_blur(self);
        }
    }
}

impl TabIdentity for Tab {
    fn tab_type(&self) -> &str {
        &self.tab_type
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn query(&self) -> &Query {
        &self.query
    }
}

/// Structural equality; lifecycle hooks do not take part.
impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        crate::containment::equal_tabs(self, other)
    }
}

impl Eq for Tab {}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("type", &self.tab_type)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("has_lifecycle", &self.lifecycle.is_some())
            .finish()
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tab_type)?;
        if !self.params.is_empty() {
            let pairs: Vec<String> = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "({})", pairs.join(", "))?;
        }
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        Ok(())
    }
}

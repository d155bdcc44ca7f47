//! Persisted tab shape.
//!
//! A stored tab is only its identity: the route type plus the route and
//! query parameters that were active when it was opened. Live tabs are
//! rebuilt from these records by the engine's factory registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from parameter name to value.
///
/// A sorted map keeps serialized records and generated query strings stable.
pub type ParamMap = BTreeMap<String, String>;

/// Serialized `{type, params, query}` form of a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Route type this tab belongs to
    #[serde(rename = "type")]
    pub tab_type: String,
    /// Route parameters extracted from the path
    #[serde(default)]
    pub params: ParamMap,
    /// Query parameters
    #[serde(default)]
    pub query: ParamMap,
}

impl TabRecord {
    /// Create a record with empty params and query.
    pub fn new(tab_type: impl Into<String>) -> Self {
        Self {
            tab_type: tab_type.into(),
            params: ParamMap::new(),
            query: ParamMap::new(),
        }
    }

    /// Builder-style helper to add a route parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Builder-style helper to add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}

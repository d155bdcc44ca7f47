//! Tab factories: how a route turns `(params, query)` into a [`Tab`].

use super::{Params, Query, Tab};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds the tab for a matched route.
pub type TabFactory = Arc<dyn Fn(&Params, &Query) -> Tab + Send + Sync>;

/// Factory producing hook-less tabs of `tab_type`.
pub fn plain_factory(tab_type: impl Into<String>) -> TabFactory {
    let tab_type = tab_type.into();
    Arc::new(move |params: &Params, query: &Query| {
        Tab::new(tab_type.clone(), params.clone(), query.clone())
    })
}

/// Factories keyed by tab type, consulted when a route tree is built from a
/// configuration file. Types without a registered factory get
/// [`plain_factory`].
#[derive(Clone, Default)]
pub struct TabFactoryRegistry {
    factories: HashMap<String, TabFactory>,
}

impl TabFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `tab_type`.
    pub fn register<F>(&mut self, tab_type: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Params, &Query) -> Tab + Send + Sync + 'static,
    {
        self.factories.insert(tab_type.into(), Arc::new(factory));
        self
    }

    pub fn get(&self, tab_type: &str) -> Option<TabFactory> {
        self.factories.get(tab_type).cloned()
    }

    /// Registered factory, or a plain one.
    pub fn resolve(&self, tab_type: &str) -> TabFactory {
        self.get(tab_type)
            .unwrap_or_else(|| plain_factory(tab_type))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for TabFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&String> = self.factories.keys().collect();
        types.sort();
        f.debug_struct("TabFactoryRegistry")
            .field("types", &types)
            .finish()
    }
}

//! Builder-side route definitions, turned into a [`RouteTree`](super::RouteTree).

use crate::tab::{Params, Query, Tab, TabFactory};
use router_tabs_config::RouteConfig;
use std::fmt;
use std::sync::Arc;

/// Where a route's tab comes from.
#[derive(Clone)]
pub enum TabSource {
    /// Hook-less tab of the route's own type
    Plain,
    /// Caller-supplied factory
    Factory(TabFactory),
}

impl fmt::Debug for TabSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabSource::Plain => write!(f, "Plain"),
            TabSource::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// One route as declared by the application.
///
/// ```
/// use router_tabs::route::RouteDescriptor;
///
/// let users = RouteDescriptor::new("/users").with_children(vec![
///     RouteDescriptor::index().with_type("user-list").with_plain_tab(),
///     RouteDescriptor::new(":id").with_type("user").with_plain_tab(),
/// ]);
/// assert_eq!(users.children().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteDescriptor {
    pub(crate) path: Option<String>,
    pub(crate) route_type: Option<String>,
    pub(crate) tab: Option<TabSource>,
    pub(crate) index: bool,
    pub(crate) force_initialization: bool,
    pub(crate) initialize_types_on_add: Vec<String>,
    pub(crate) children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    /// Route with its own path pattern (relative to the parent).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Pathless layout route: inherits the parent's path.
    pub fn layout() -> Self {
        Self::default()
    }

    /// Index route: matches exactly its parent's path.
    pub fn index() -> Self {
        Self {
            index: true,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, route_type: impl Into<String>) -> Self {
        self.route_type = Some(route_type.into());
        self
    }

    /// Open a hook-less tab of this route's type when matched.
    pub fn with_plain_tab(mut self) -> Self {
        self.tab = Some(TabSource::Plain);
        self
    }

    /// Open the tab built by `factory` when matched.
    pub fn with_tab<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Params, &Query) -> Tab + Send + Sync + 'static,
    {
        self.tab = Some(TabSource::Factory(Arc::new(factory)));
        self
    }

    pub fn with_tab_factory(mut self, factory: TabFactory) -> Self {
        self.tab = Some(TabSource::Factory(factory));
        self
    }

    /// Open this tab whenever an ancestor route matches.
    pub fn force_initialization(mut self) -> Self {
        self.force_initialization = true;
        self
    }

    /// Tab types to open (without focus) alongside this route's tab.
    pub fn initialize_types_on_add<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initialize_types_on_add = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_child(mut self, child: RouteDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn route_type(&self) -> Option<&str> {
        self.route_type.as_deref()
    }

    pub fn children(&self) -> &[RouteDescriptor] {
        &self.children
    }

    /// Descriptor for a configured route; tab routes use `resolve_factory`.
    pub fn from_config(
        config: &RouteConfig,
        resolve_factory: &impl Fn(&str) -> TabFactory,
    ) -> Self {
        let tab = match (&config.route_type, config.tab) {
            (Some(route_type), true) => Some(TabSource::Factory(resolve_factory(route_type))),
            // Rejected later by the tree builder
            (None, true) => Some(TabSource::Plain),
            (_, false) => None,
        };
        Self {
            path: config.path.clone(),
            route_type: config.route_type.clone(),
            tab,
            index: config.index,
            force_initialization: config.force_initialization,
            initialize_types_on_add: config.initialize_types_on_add.clone(),
            children: config
                .children
                .iter()
                .map(|child| Self::from_config(child, resolve_factory))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::plain_factory;

    #[test]
    fn test_builder() {
        let route = RouteDescriptor::new("/users/:id")
            .with_type("user")
            .with_plain_tab()
            .force_initialization()
            .initialize_types_on_add(["activity"]);
        assert_eq!(route.path(), Some("/users/:id"));
        assert_eq!(route.route_type(), Some("user"));
        assert!(route.force_initialization);
        assert_eq!(route.initialize_types_on_add, vec!["activity".to_string()]);
        assert!(matches!(route.tab, Some(TabSource::Plain)));
    }

    #[test]
    fn test_from_config_resolves_factories() {
        let config = RouteConfig {
            path: Some("/inbox".into()),
            route_type: Some("inbox".into()),
            tab: true,
            children: vec![RouteConfig {
                path: Some(":id".into()),
                ..RouteConfig::default()
            }],
            ..RouteConfig::default()
        };
        let descriptor = RouteDescriptor::from_config(&config, &|t: &str| plain_factory(t));
        assert!(matches!(descriptor.tab, Some(TabSource::Factory(_))));
        assert_eq!(descriptor.children().len(), 1);
        assert!(descriptor.children()[0].tab.is_none());
    }
}

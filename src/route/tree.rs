//! Immutable route tree.
//!
//! Nodes live in an arena indexed by [`RouteId`]; parent links make ancestor
//! chains cheap. Every node carries its composed absolute path (parent path
//! joined with its own, inherited when it has none), its resolved tab
//! factory, and its eager-initialization settings.

use super::descriptor::{RouteDescriptor, TabSource};
use crate::tab::{TabFactory, TabFactoryRegistry, plain_factory};
use crate::url::collapse_slashes;
use router_tabs_config::RouteConfig;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Problems detected while building a [`RouteTree`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTreeError {
    #[error("Route type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("Route '{path}' opens a tab but has no type")]
    TabWithoutType { path: String },

    #[error("Route type '{route_type}' initializes unknown type '{eager}'")]
    UnknownEagerType { route_type: String, eager: String },
}

/// Arena index of a route node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One resolved route.
#[derive(Clone)]
pub struct RouteNode {
    id: RouteId,
    parent: Option<RouteId>,
    children: Vec<RouteId>,
    own_path: Option<String>,
    full_path: Option<String>,
    route_type: Option<String>,
    tab: Option<TabFactory>,
    index: bool,
    force_initialization: bool,
    initialize_types_on_add: Vec<String>,
}

impl RouteNode {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn parent(&self) -> Option<RouteId> {
        self.parent
    }

    pub fn children(&self) -> &[RouteId] {
        &self.children
    }

    /// Pattern as declared, relative to the parent.
    pub fn own_path(&self) -> Option<&str> {
        self.own_path.as_deref()
    }

    /// Composed absolute pattern, `None` when no ancestor declares a path.
    pub fn full_path(&self) -> Option<&str> {
        self.full_path.as_deref()
    }

    pub fn route_type(&self) -> Option<&str> {
        self.route_type.as_deref()
    }

    pub fn tab_factory(&self) -> Option<&TabFactory> {
        self.tab.as_ref()
    }

    pub fn has_tab(&self) -> bool {
        self.tab.is_some()
    }

    pub fn is_index(&self) -> bool {
        self.index
    }

    pub fn force_initialization(&self) -> bool {
        self.force_initialization
    }

    pub fn initialize_types_on_add(&self) -> &[String] {
        &self.initialize_types_on_add
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("id", &self.id)
            .field("full_path", &self.full_path)
            .field("route_type", &self.route_type)
            .field("has_tab", &self.tab.is_some())
            .field("index", &self.index)
            .field("force_initialization", &self.force_initialization)
            .field("initialize_types_on_add", &self.initialize_types_on_add)
            .finish()
    }
}

/// Route hierarchy shared by the locator, matcher and engine.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    roots: Vec<RouteId>,
}

fn compose_path(parent: Option<&str>, own: Option<&str>) -> Option<String> {
    match (parent, own) {
        (_, None) => parent.map(str::to_string),
        (None, Some(own)) => Some(collapse_slashes(own)),
        (Some(parent), Some(own)) => Some(collapse_slashes(&format!("{}/{}", parent, own))),
    }
}

impl RouteTree {
    /// Build and validate a tree from descriptors.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTreeError> {
        let mut tree = RouteTree::default();
        for route in routes {
            let id = tree.insert(route, None)?;
            tree.roots.push(id);
        }
        tree.validate()?;
        log::debug!(
            "Built route tree with {} nodes ({} roots)",
            tree.nodes.len(),
            tree.roots.len()
        );
        Ok(tree)
    }

    /// Build a tree from configuration, taking tab factories from `registry`.
    pub fn from_config(
        routes: &[RouteConfig],
        registry: &TabFactoryRegistry,
    ) -> Result<Self, RouteTreeError> {
        let resolve = |route_type: &str| registry.resolve(route_type);
        Self::new(
            routes
                .iter()
                .map(|route| RouteDescriptor::from_config(route, &resolve))
                .collect(),
        )
    }

    fn insert(
        &mut self,
        route: RouteDescriptor,
        parent: Option<RouteId>,
    ) -> Result<RouteId, RouteTreeError> {
        let id = RouteId(self.nodes.len());
        let parent_path = parent.and_then(|p| self.nodes[p.0].full_path.clone());
        let full_path = compose_path(parent_path.as_deref(), route.path.as_deref());

        let tab = match (route.tab, &route.route_type) {
            (None, _) => None,
            (Some(TabSource::Factory(factory)), Some(_)) => Some(factory),
            (Some(TabSource::Plain), Some(route_type)) => Some(plain_factory(route_type.clone())),
            (Some(_), None) => {
                return Err(RouteTreeError::TabWithoutType {
                    path: full_path.unwrap_or_else(|| "<inherited>".to_string()),
                });
            }
        };

        self.nodes.push(RouteNode {
            id,
            parent,
            children: Vec::new(),
            own_path: route.path,
            full_path,
            route_type: route.route_type,
            tab,
            index: route.index,
            force_initialization: route.force_initialization,
            initialize_types_on_add: route.initialize_types_on_add,
        });

        for child in route.children {
            let child_id = self.insert(child, Some(id))?;
            self.nodes[id.0].children.push(child_id);
        }
        Ok(id)
    }

    fn validate(&self) -> Result<(), RouteTreeError> {
        let mut seen: HashMap<&str, RouteId> = HashMap::new();
        for node in &self.nodes {
            if let Some(route_type) = node.route_type()
                && seen.insert(route_type, node.id).is_some()
            {
                return Err(RouteTreeError::DuplicateType(route_type.to_string()));
            }
        }
        for node in &self.nodes {
            for eager in &node.initialize_types_on_add {
                if !seen.contains_key(eager.as_str()) {
                    return Err(RouteTreeError::UnknownEagerType {
                        route_type: node.route_type().unwrap_or_default().to_string(),
                        eager: eager.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn node(&self, id: RouteId) -> &RouteNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[RouteId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteNode> {
        self.nodes.iter()
    }

    /// `id` and its ancestors, outermost first.
    pub fn chain(&self, id: RouteId) -> Vec<RouteId> {
        let mut chain = vec![id];
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.nodes[parent.0].parent;
        }
        chain.reverse();
        chain
    }
}

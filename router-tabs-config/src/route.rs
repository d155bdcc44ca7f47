//! `RouteConfig`: one node of the configured route tree.

use serde::{Deserialize, Serialize};

/// Serialized form of a route descriptor.
///
/// ```yaml
/// routes:
///   - path: /users
///     children:
///       - path: ":id"
///         type: user
///         tab: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path pattern, relative to the parent. Absent means "inherit the parent path".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Tab kind produced by this route. Unique across the tree.
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub route_type: Option<String>,

    /// Whether matching this route opens a tab
    #[serde(default = "crate::defaults::bool_false")]
    pub tab: bool,

    /// Index route: matches its parent's path exactly
    #[serde(default = "crate::defaults::bool_false")]
    pub index: bool,

    /// Open this route's tab whenever an ancestor route matches
    #[serde(default = "crate::defaults::bool_false")]
    pub force_initialization: bool,

    /// Tab types opened alongside this route's tab
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initialize_types_on_add: Vec<String>,

    /// Nested routes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    /// Visit this route and all descendants, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RouteConfig)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

//! Route tree, lookup and matching.

mod descriptor;
mod hierarchy;
mod locator;
mod matcher;
mod tree;

pub use descriptor::{RouteDescriptor, TabSource};
pub use hierarchy::{HierarchyEntry, TabHierarchy};
pub use locator::{
    AttributeValue, RouteAttribute, RouteChain, find_route, find_route_by_path, find_route_by_type,
    find_route_with_parents,
};
pub use matcher::{PathMatcher, PatternMatcher, RouteMatch, SPLAT_PARAM};
pub use tree::{RouteId, RouteNode, RouteTree, RouteTreeError};

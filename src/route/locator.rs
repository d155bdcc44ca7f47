//! Route lookup by attribute.
//!
//! Traversal is descendant-first: a node's children are searched before the
//! node itself, so an index child sharing its parent's path is found ahead of
//! the parent. The same order is used for every attribute.

use super::tree::{RouteId, RouteNode, RouteTree};

/// Attribute a lookup predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAttribute {
    /// Composed absolute path
    Path,
    /// Route type
    Type,
    /// Whether the route opens a tab
    Tab,
    /// Whether the route is an index route
    Index,
}

/// Value of a [`RouteAttribute`] on one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    Missing,
    Text(&'a str),
    Flag(bool),
}

fn text(value: Option<&str>) -> AttributeValue<'_> {
    match value {
        Some(text) => AttributeValue::Text(text),
        None => AttributeValue::Missing,
    }
}

impl RouteNode {
    pub fn attribute(&self, attribute: RouteAttribute) -> AttributeValue<'_> {
        match attribute {
            RouteAttribute::Path => text(self.full_path()),
            RouteAttribute::Type => text(self.route_type()),
            RouteAttribute::Tab => AttributeValue::Flag(self.has_tab()),
            RouteAttribute::Index => AttributeValue::Flag(self.is_index()),
        }
    }
}

/// A located route with its ancestors.
#[derive(Debug, Clone)]
pub struct RouteChain<'t> {
    nodes: Vec<&'t RouteNode>,
}

impl<'t> RouteChain<'t> {
    /// The located route.
    pub fn target(&self) -> &'t RouteNode {
        // A chain always holds at least the target
        self.nodes[self.nodes.len() - 1]
    }

    /// Ancestors, outermost first.
    pub fn parents(&self) -> &[&'t RouteNode] {
        &self.nodes[..self.nodes.len() - 1]
    }

    /// Ancestors followed by the target.
    pub fn nodes(&self) -> &[&'t RouteNode] {
        &self.nodes
    }
}

fn search<F>(tree: &RouteTree, ids: &[RouteId], attribute: RouteAttribute, predicate: &F) -> Option<RouteId>
where
    F: Fn(AttributeValue<'_>) -> bool,
{
    for &id in ids {
        let node = tree.node(id);
        if let Some(found) = search(tree, node.children(), attribute, predicate) {
            return Some(found);
        }
        if predicate(node.attribute(attribute)) {
            return Some(id);
        }
    }
    None
}

/// First route (descendant-first) whose `attribute` satisfies `predicate`.
pub fn find_route<F>(tree: &RouteTree, attribute: RouteAttribute, predicate: F) -> Option<&RouteNode>
where
    F: Fn(AttributeValue<'_>) -> bool,
{
    search(tree, tree.roots(), attribute, &predicate).map(|id| tree.node(id))
}

/// Like [`find_route`], also returning the ancestor chain.
pub fn find_route_with_parents<F>(
    tree: &RouteTree,
    attribute: RouteAttribute,
    predicate: F,
) -> Option<RouteChain<'_>>
where
    F: Fn(AttributeValue<'_>) -> bool,
{
    let id = search(tree, tree.roots(), attribute, &predicate)?;
    Some(RouteChain {
        nodes: tree.chain(id).into_iter().map(|id| tree.node(id)).collect(),
    })
}

/// Route declaring `route_type`.
pub fn find_route_by_type<'t>(tree: &'t RouteTree, route_type: &str) -> Option<&'t RouteNode> {
    find_route(tree, RouteAttribute::Type, |value| {
        value == AttributeValue::Text(route_type)
    })
}

/// Route whose composed path equals `path`.
pub fn find_route_by_path<'t>(tree: &'t RouteTree, path: &str) -> Option<&'t RouteNode> {
    find_route(tree, RouteAttribute::Path, |value| value == AttributeValue::Text(path))
}

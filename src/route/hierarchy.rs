//! Snapshot of the tabs along one matched branch, keyed by concrete path
//! segment.

use super::locator::{AttributeValue, RouteAttribute, find_route_with_parents};
use super::matcher::{RouteMatch, concrete_path};
use super::tree::{RouteId, RouteTree};
use crate::tab::{Params, Query, Tab};

/// One tab-bearing level of a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEntry {
    /// Concrete path of the route at this level
    pub segment: String,
    pub route: RouteId,
    pub tab: Tab,
}

/// Tabs of the active branch, outermost first. Rebuilt (never mutated) on
/// every synchronization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabHierarchy {
    entries: Vec<HierarchyEntry>,
}

impl TabHierarchy {
    /// Tabs for every tab-bearing route in `matches`.
    pub fn build(tree: &RouteTree, matches: &[RouteMatch], query: &Query) -> Self {
        let entries = matches
            .iter()
            .filter_map(|m| {
                let factory = tree.node(m.route).tab_factory()?;
                Some(HierarchyEntry {
                    segment: m.pathname.clone(),
                    route: m.route,
                    tab: factory(&m.params, query),
                })
            })
            .collect();
        Self { entries }
    }

    /// Tabs along the route declaring `route_type` and its ancestors, as if
    /// that route had been matched with `params` and `query`.
    pub fn for_route(tree: &RouteTree, route_type: &str, params: &Params, query: &Query) -> Option<Self> {
        let chain = find_route_with_parents(tree, RouteAttribute::Type, |value| {
            value == AttributeValue::Text(route_type)
        })?;
        let entries = chain
            .nodes()
            .iter()
            .filter_map(|node| {
                let factory = node.tab_factory()?;
                Some(HierarchyEntry {
                    segment: concrete_path(node.full_path(), params),
                    route: node.id(),
                    tab: factory(params, query),
                })
            })
            .collect();
        Some(Self { entries })
    }

    /// Tab whose route resolved to `segment`.
    pub fn get(&self, segment: &str) -> Option<&Tab> {
        self.entries
            .iter()
            .find(|entry| entry.segment == segment)
            .map(|entry| &entry.tab)
    }

    /// Innermost tab of the branch.
    pub fn innermost(&self) -> Option<&HierarchyEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{PathMatcher, PatternMatcher, RouteDescriptor};
    use crate::tab::TabIdentity;

    fn tree() -> RouteTree {
        RouteTree::new(vec![RouteDescriptor::new("/projects/:project")
            .with_type("project")
            .with_plain_tab()
            .with_children(vec![
                RouteDescriptor::new("settings").with_type("project-settings"),
                RouteDescriptor::new("issues/:issue")
                    .with_type("issue")
                    .with_plain_tab(),
            ])])
        .unwrap()
    }

    #[test]
    fn test_build_from_matches() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/projects/p1/issues/9");
        let hierarchy = TabHierarchy::build(&tree, &matches, &Query::new());

        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.get("/projects/p1").unwrap().tab_type(), "project");
        let issue = hierarchy.get("/projects/p1/issues/9").unwrap();
        assert_eq!(issue.params()["issue"], "9");
        assert_eq!(hierarchy.innermost().unwrap().tab.tab_type(), "issue");
    }

    #[test]
    fn test_routes_without_tabs_are_skipped() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/projects/p1/settings");
        let hierarchy = TabHierarchy::build(&tree, &matches, &Query::new());
        assert_eq!(hierarchy.len(), 1);
        assert!(hierarchy.get("/projects/p1/settings").is_none());
    }

    #[test]
    fn test_for_route() {
        let tree = tree();
        let mut params = Params::new();
        params.insert("project".into(), "p2".into());
        params.insert("issue".into(), "3".into());
        let hierarchy = TabHierarchy::for_route(&tree, "issue", &params, &Query::new()).unwrap();
        let segments: Vec<&str> = hierarchy.entries().iter().map(|e| e.segment.as_str()).collect();
        assert_eq!(segments, vec!["/projects/p2", "/projects/p2/issues/3"]);
        assert!(TabHierarchy::for_route(&tree, "ghost", &params, &Query::new()).is_none());
    }
}

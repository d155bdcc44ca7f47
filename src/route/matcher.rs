//! Location pathname → ordered route matches.
//!
//! [`PatternMatcher`] ranks every route branch the way nested routers
//! conventionally do: a branch's score grows with its segment count and
//! favours static segments over dynamic ones, index routes over their parents
//! and anything over a splat. The best-scoring branch that matches wins; ties
//! go to the branch declared first (children before their parents).

use super::tree::{RouteId, RouteTree};
use crate::tab::{Params, Query};
use crate::url::generate_route_url;

const STATIC_SEGMENT_VALUE: i32 = 10;
const DYNAMIC_SEGMENT_VALUE: i32 = 3;
const INDEX_ROUTE_VALUE: i32 = 2;
const EMPTY_SEGMENT_VALUE: i32 = 1;
const SPLAT_PENALTY: i32 = -2;

/// Param name holding the remainder matched by a trailing `*`.
pub const SPLAT_PARAM: &str = "*";

/// One matched route, outermost first in a match list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: RouteId,
    /// Params of the whole matched branch
    pub params: Params,
    /// Concrete path of this route within the location
    pub pathname: String,
}

/// Resolves a pathname against a route tree.
pub trait PathMatcher: Send + Sync {
    /// Ordered matches from outermost to innermost; empty when nothing matches.
    fn match_routes(&self, tree: &RouteTree, pathname: &str) -> Vec<RouteMatch>;
}

/// Default [`PathMatcher`]: `:param`, `:param?`, trailing `*`, index routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher {
    case_sensitive: bool,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare static segments case-sensitively (default: insensitive).
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

#[derive(Debug)]
struct Branch {
    pattern: String,
    score: i32,
    chain: Vec<RouteId>,
}

fn flatten(tree: &RouteTree, ids: &[RouteId], branches: &mut Vec<Branch>) {
    for &id in ids {
        let node = tree.node(id);
        flatten(tree, node.children(), branches);

        // Pathless layout routes never match on their own
        if node.own_path().is_none() && !node.is_index() {
            continue;
        }
        let Some(path) = node.full_path() else {
            continue;
        };
        for pattern in explode_optional_segments(path) {
            branches.push(Branch {
                score: compute_score(&pattern, node.is_index()),
                pattern,
                chain: tree.chain(id),
            });
        }
    }
}

fn explode(segments: &[&str]) -> Vec<String> {
    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };
    let optional = first.ends_with('?');
    let required = first.strip_suffix('?').unwrap_or(first);

    if rest.is_empty() {
        return if optional {
            vec![required.to_string(), String::new()]
        } else {
            vec![required.to_string()]
        };
    }

    let rest_exploded = explode(rest);
    let mut result: Vec<String> = rest_exploded
        .iter()
        .map(|sub| {
            if sub.is_empty() {
                required.to_string()
            } else {
                format!("{}/{}", required, sub)
            }
        })
        .collect();
    if optional {
        result.extend(rest_exploded);
    }
    result
}

/// Every concrete pattern an optional-segment pattern stands for, longest
/// first: `/a/:b?` → `["/a/:b", "/a"]`.
pub(crate) fn explode_optional_segments(path: &str) -> Vec<String> {
    if !path.contains('?') {
        return vec![path.to_string()];
    }
    let segments: Vec<&str> = path.split('/').collect();
    explode(&segments)
        .into_iter()
        .map(|exploded| {
            if exploded.is_empty() && path.starts_with('/') {
                "/".to_string()
            } else {
                exploded
            }
        })
        .collect()
}

fn is_dynamic(segment: &str) -> bool {
    segment
        .strip_prefix(':')
        .is_some_and(|name| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

pub(crate) fn compute_score(pattern: &str, index: bool) -> i32 {
    let segments: Vec<&str> = pattern.split('/').collect();
    let mut score = segments.len() as i32;
    if segments.contains(&SPLAT_PARAM) {
        score += SPLAT_PENALTY;
    }
    if index {
        score += INDEX_ROUTE_VALUE;
    }
    segments
        .iter()
        .filter(|s| **s != SPLAT_PARAM)
        .fold(score, |score, segment| {
            score
                + if is_dynamic(segment) {
                    DYNAMIC_SEGMENT_VALUE
                } else if segment.is_empty() {
                    EMPTY_SEGMENT_VALUE
                } else {
                    STATIC_SEGMENT_VALUE
                }
        })
}

/// Match a concrete (optional-free) pattern against a whole pathname.
pub(crate) fn match_pattern(pattern: &str, pathname: &str, case_sensitive: bool) -> Option<Params> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

    let (fixed, splat) = match pattern_segments.split_last() {
        Some((&last, fixed)) if last == SPLAT_PARAM => (fixed, true),
        _ => (pattern_segments.as_slice(), false),
    };
    if splat && path_segments.len() < fixed.len() {
        return None;
    }
    if !splat && path_segments.len() != fixed.len() {
        return None;
    }

    let mut params = Params::new();
    for (expected, actual) in fixed.iter().zip(&path_segments) {
        if is_dynamic(expected) {
            params.insert(expected[1..].to_string(), actual.to_string());
            continue;
        }
        let same = if case_sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        };
        if !same {
            return None;
        }
    }
    if splat {
        params.insert(SPLAT_PARAM.to_string(), path_segments[fixed.len()..].join("/"));
    }
    Some(params)
}

/// Concrete path of a route given the params of its match.
pub(crate) fn concrete_path(pattern: Option<&str>, params: &Params) -> String {
    let pattern = pattern.unwrap_or("/");
    let path = generate_route_url(pattern, params, &Query::new());
    match (path.strip_suffix(SPLAT_PARAM), params.get(SPLAT_PARAM)) {
        (Some(prefix), Some(rest)) => format!("{}{}", prefix, rest),
        _ => path,
    }
}

impl PathMatcher for PatternMatcher {
    fn match_routes(&self, tree: &RouteTree, pathname: &str) -> Vec<RouteMatch> {
        let mut branches = Vec::new();
        flatten(tree, tree.roots(), &mut branches);
        // Stable: equal scores keep declaration order
        branches.sort_by(|a, b| b.score.cmp(&a.score));

        for branch in &branches {
            let Some(params) = match_pattern(&branch.pattern, pathname, self.case_sensitive) else {
                continue;
            };
            log::trace!(
                "Pathname '{}' matched pattern '{}' (score {})",
                pathname,
                branch.pattern,
                branch.score
            );
            return branch
                .chain
                .iter()
                .map(|&id| RouteMatch {
                    route: id,
                    pathname: concrete_path(tree.node(id).full_path(), &params),
                    params: params.clone(),
                })
                .collect();
        }
        log::trace!("Pathname '{}' matched no route", pathname);
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteDescriptor;

    fn tree() -> RouteTree {
        RouteTree::new(vec![
            RouteDescriptor::new("/").with_type("home"),
            RouteDescriptor::new("/users").with_type("users").with_children(vec![
                RouteDescriptor::index().with_type("user-list"),
                RouteDescriptor::new("new").with_type("user-new"),
                RouteDescriptor::new(":id").with_type("user").with_children(vec![
                    RouteDescriptor::new("tab/:section?").with_type("user-section"),
                ]),
            ]),
            RouteDescriptor::new("/files/*").with_type("files"),
        ])
        .unwrap()
    }

    fn types(tree: &RouteTree, matches: &[RouteMatch]) -> Vec<String> {
        matches
            .iter()
            .map(|m| tree.node(m.route).route_type().unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn test_explode_optional_segments() {
        assert_eq!(explode_optional_segments("/a/:b?"), vec!["/a/:b", "/a"]);
        assert_eq!(explode_optional_segments("/:lang?"), vec!["/:lang", "/"]);
        assert_eq!(
            explode_optional_segments("/:a?/:b?"),
            vec!["/:a/:b", "/:a", "/:b", "/"]
        );
        assert_eq!(explode_optional_segments("/plain"), vec!["/plain"]);
    }

    #[test]
    fn test_scores() {
        assert_eq!(compute_score("/users/:id", false), 17);
        assert_eq!(compute_score("/users", true), 15);
        assert_eq!(compute_score("/files/*", false), 12);
        assert!(compute_score("/users/new", false) > compute_score("/users/:id", false));
    }

    #[test]
    fn test_match_pattern() {
        let params = match_pattern("/users/:id", "/Users/7/", false).unwrap();
        assert_eq!(params["id"], "7");
        assert!(match_pattern("/users/:id", "/Users/7", true).is_none());
        assert!(match_pattern("/users/:id", "/users", false).is_none());
        let splat = match_pattern("/files/*", "/files/a/b.txt", false).unwrap();
        assert_eq!(splat["*"], "a/b.txt");
    }

    #[test]
    fn test_index_route_beats_parent() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/users");
        assert_eq!(types(&tree, &matches), vec!["users", "user-list"]);
    }

    #[test]
    fn test_static_beats_dynamic() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/users/new");
        assert_eq!(types(&tree, &matches), vec!["users", "user-new"]);
    }

    #[test]
    fn test_nested_match_carries_merged_params() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/users/5/tab/posts");
        assert_eq!(types(&tree, &matches), vec!["users", "user", "user-section"]);
        for m in &matches {
            assert_eq!(m.params["id"], "5");
            assert_eq!(m.params["section"], "posts");
        }
        let paths: Vec<&str> = matches.iter().map(|m| m.pathname.as_str()).collect();
        assert_eq!(paths, vec!["/users", "/users/5", "/users/5/tab/posts"]);
    }

    #[test]
    fn test_optional_segment_absent() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/users/5/tab");
        assert_eq!(types(&tree, &matches), vec!["users", "user", "user-section"]);
        assert!(!matches[2].params.contains_key("section"));
    }

    #[test]
    fn test_splat_route() {
        let tree = tree();
        let matches = PatternMatcher::new().match_routes(&tree, "/files/docs/readme.md");
        assert_eq!(types(&tree, &matches), vec!["files"]);
        assert_eq!(matches[0].pathname, "/files/docs/readme.md");
    }

    #[test]
    fn test_root_and_no_match() {
        let tree = tree();
        let matcher = PatternMatcher::new();
        assert_eq!(types(&tree, &matcher.match_routes(&tree, "/")), vec!["home"]);
        assert!(matcher.match_routes(&tree, "/nowhere").is_empty());
    }
}

//! Concrete URLs from path patterns.
//!
//! Patterns use `:name` for required and `:name?` for optional segments.

use crate::tab::{Params, Query};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)(\?)?").expect("PLACEHOLDER_RE regex pattern is valid")
});

/// Collapse runs of `/` into one.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Substitute `params` into `pattern` and append `query`.
///
/// - `:name` / `:name?` with a non-empty value is replaced by the value
/// - `:name?` without a value is dropped along with any slash it leaves behind
/// - `:name` without a value stays in the output literally
/// - the query is appended form-urlencoded (sorted by key) only when non-empty
pub fn generate_route_url(pattern: &str, params: &Params, query: &Query) -> String {
    let mut dropped_optional = false;
    let substituted = PLACEHOLDER_RE.replace_all(pattern, |caps: &Captures| {
        let name = &caps[1];
        let optional = caps.get(2).is_some();
        match params.get(name).filter(|v| !v.is_empty()) {
            Some(value) => value.clone(),
            None if optional => {
                dropped_optional = true;
                String::new()
            }
            None => caps[0].to_string(),
        }
    });

    let mut path = collapse_slashes(&substituted);
    if dropped_optional && path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    if query.is_empty() {
        return path;
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish();
    format!("{}?{}", path, encoded)
}

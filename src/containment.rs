//! Structural containment: "every key of the source exists in the target with
//! an equal (recursively contained) value".
//!
//! Containment drives tab identity throughout the engine: two tabs are the
//! same tab when each contains the other, and closing a tab also closes the
//! tabs whose params and query are contained in it.

use crate::tab::TabIdentity;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Types that can be checked for structural containment.
pub trait Containment {
    /// `true` when every key of `self` is present in `target` with a
    /// contained value. Scalars compare by equality.
    fn is_contained_in(&self, target: &Self) -> bool;
}

impl Containment for str {
    fn is_contained_in(&self, target: &Self) -> bool {
        self == target
    }
}

impl Containment for String {
    fn is_contained_in(&self, target: &Self) -> bool {
        self == target
    }
}

impl<K: Ord, V: Containment> Containment for BTreeMap<K, V> {
    fn is_contained_in(&self, target: &Self) -> bool {
        self.iter().all(|(key, value)| {
            target
                .get(key)
                .is_some_and(|other| value.is_contained_in(other))
        })
    }
}

impl<K: Hash + Eq, V: Containment, S: BuildHasher> Containment for HashMap<K, V, S> {
    fn is_contained_in(&self, target: &Self) -> bool {
        self.iter().all(|(key, value)| {
            target
                .get(key)
                .is_some_and(|other| value.is_contained_in(other))
        })
    }
}

impl<T: Containment> Containment for Option<T> {
    fn is_contained_in(&self, target: &Self) -> bool {
        match (self, target) {
            (None, None) => true,
            (Some(source), Some(target)) => source.is_contained_in(target),
            _ => false,
        }
    }
}

impl Containment for Value {
    fn is_contained_in(&self, target: &Self) -> bool {
        match (self, target) {
            (Value::Object(source), Value::Object(target)) => {
                source.iter().all(|(key, value)| {
                    target
                        .get(key)
                        .is_some_and(|other| value.is_contained_in(other))
                })
            }
            // Arrays are keyed by index
            (Value::Array(source), Value::Array(target)) => {
                source.len() <= target.len()
                    && source
                        .iter()
                        .zip(target.iter())
                        .all(|(value, other)| value.is_contained_in(other))
            }
            (Value::Object(_) | Value::Array(_), _) | (_, Value::Object(_) | Value::Array(_)) => {
                false
            }
            (source, target) => source == target,
        }
    }
}

/// `true` when `source` is structurally contained in `target`.
///
/// Identical references short-circuit to `true`.
pub fn contains<T: Containment + ?Sized>(source: &T, target: &T) -> bool {
    std::ptr::eq(source, target) || source.is_contained_in(target)
}

/// Two tabs are equal when their types match and params and query are each
/// mutually contained.
pub fn equal_tabs<A: TabIdentity + ?Sized, B: TabIdentity + ?Sized>(a: &A, b: &B) -> bool {
    a.tab_type() == b.tab_type()
        && contains(a.params(), b.params())
        && contains(b.params(), a.params())
        && contains(a.query(), b.query())
        && contains(b.query(), a.query())
}

/// Whether `candidate` is swept along when `removed` is closed.
///
/// A candidate is related when the removed tab's params and query are both
/// contained in the candidate's, so closing a parent closes the tabs nested
/// under it. Closing a tab with neither params nor query relates nothing:
/// the empty map is contained in everything.
pub fn is_related_tab<A: TabIdentity + ?Sized, B: TabIdentity + ?Sized>(
    candidate: &A,
    removed: &B,
) -> bool {
    if removed.params().is_empty() && removed.query().is_empty() {
        return false;
    }
    contains(removed.params(), candidate.params()) && contains(removed.query(), candidate.query())
}

//! Tab removal: cascade, redirect targets and explicit navigation.

mod common;

use common::{harness, harness_with, nested_routes, simple_routes, tab, user};
use router_tabs::RouterTabsError;
use router_tabs::route::{RouteDescriptor, RouteTree};
use router_tabs::store::MemoryStorage;

// ============================================================================
// Removing tabs that are not active
// ============================================================================

#[test]
fn removing_inactive_tab_does_not_navigate() {
    let mut h = harness(simple_routes());
    h.engine.location_changed("/users/1");
    h.engine.location_changed("/users/2");
    h.take_events();

    h.engine.remove(&user("1")).unwrap();

    assert_eq!(h.tab_names(), vec!["user(id=2)"]);
    assert_eq!(h.active_name().as_deref(), Some("user(id=2)"));
    assert_eq!(h.take_events(), vec!["remove user(id=1)"]);
    assert!(h.navigations().is_empty());
}

#[test]
fn removing_unknown_tab_is_a_noop() {
    let mut h = harness(simple_routes());
    h.engine.location_changed("/users/1");
    h.take_events();

    h.engine.remove(&user("99")).unwrap();
    assert_eq!(h.engine.tabs().len(), 1);
    assert!(h.take_events().is_empty());
}

// ============================================================================
// Redirecting away from a removed active tab
// ============================================================================

#[test]
fn removing_active_tab_focuses_first_sibling_of_same_type() {
    let mut h = harness(simple_routes());
    for location in ["/users/1", "/users/2", "/search?q=x", "/users/1"] {
        h.engine.location_changed(location);
    }
    h.take_events();

    h.engine.remove(&user("1")).unwrap();

    assert_eq!(h.navigations(), vec!["/users/2"]);
    assert_eq!(h.active_name().as_deref(), Some("user(id=2)"));
    assert_eq!(h.tab_names(), vec!["user(id=2)", "search?q=x"]);
    // The closed tab is not blurred
    assert_eq!(
        h.take_events(),
        vec!["remove user(id=1)", "focus user(id=2)"]
    );
}

#[test]
fn removing_active_tab_without_sibling_uses_fallback() {
    let mut h = harness_with(simple_routes(), MemoryStorage::new(), |b| {
        b.fallback_path("/")
    });
    h.engine.location_changed("/users/1");

    h.engine.remove(&user("1")).unwrap();

    assert_eq!(h.navigations(), vec!["/"]);
    assert_eq!(h.tab_names(), vec!["home"]);
    assert_eq!(h.active_name().as_deref(), Some("home"));
}

#[test]
fn removing_active_tab_with_no_target_reports_error() {
    let mut h = harness(simple_routes());
    h.engine.location_changed("/users/1");

    let err = h.engine.remove(&user("1")).unwrap_err();
    assert!(matches!(
        err,
        RouterTabsError::NoRedirectTarget { ref tab_type } if tab_type == "user"
    ));
    // Removal still applied
    assert!(h.engine.tabs().is_empty());
    assert!(h.engine.active_tab().is_none());
    assert!(h.navigations().is_empty());
}

#[test]
fn removing_active_tab_reaches_sibling_differing_only_by_query() {
    let mut h = harness(simple_routes());
    for location in ["/search?q=a", "/users/1", "/search?q=b"] {
        h.engine.location_changed(location);
    }
    h.take_events();

    h.engine
        .remove(&tab("search", &[]).with_query("q", "b"))
        .unwrap();

    assert_eq!(h.navigations(), vec!["/search?q=a"]);
    assert_eq!(h.active_name().as_deref(), Some("search?q=a"));
    assert_eq!(h.tab_names(), vec!["search?q=a", "user(id=1)"]);
    assert_eq!(
        h.take_events(),
        vec!["remove search?q=b", "focus search?q=a"]
    );
}

#[test]
fn fallback_onto_the_same_routes_still_synchronizes() {
    let mut h = harness_with(simple_routes(), MemoryStorage::new(), |b| {
        b.fallback_path("/search")
    });
    h.engine.location_changed("/search?q=x");
    h.take_events();

    h.engine
        .remove(&tab("search", &[]).with_query("q", "x"))
        .unwrap();

    assert_eq!(h.navigations(), vec!["/search"]);
    assert_eq!(h.tab_names(), vec!["search"]);
    assert_eq!(h.active_name().as_deref(), Some("search"));
    assert_eq!(
        h.take_events(),
        vec!["remove search?q=x", "add search", "focus search"]
    );
}

#[test]
fn sibling_must_share_the_removed_type() {
    let mut h = harness_with(simple_routes(), MemoryStorage::new(), |b| {
        b.fallback_path("/search")
    });
    h.engine.location_changed("/");
    h.engine.location_changed("/users/1");

    h.engine.remove(&user("1")).unwrap();
    // The open home tab is not a user tab, so the fallback wins
    assert_eq!(h.navigations(), vec!["/search"]);
}

// ============================================================================
// Cascade
// ============================================================================

#[test]
fn removal_cascades_to_tabs_with_contained_params() {
    let mut h = harness(nested_routes());
    h.engine.location_changed("/users/1");
    h.engine.location_changed("/users/2");
    h.engine.location_changed("/search");
    h.take_events();

    h.engine.remove(&user("1")).unwrap();

    assert_eq!(
        h.tab_names(),
        vec!["activity(id=2)", "user(id=2)", "notes(id=2)", "search"]
    );
    assert_eq!(
        h.take_events(),
        vec![
            "remove activity(id=1)",
            "remove user(id=1)",
            "remove notes(id=1)"
        ]
    );
    // Active search tab survived
    assert!(h.navigations().is_empty());
}

/// Users with nested per-post tabs.
fn post_routes() -> RouteTree {
    RouteTree::new(vec![
        RouteDescriptor::new("/users/:id")
            .with_type("user")
            .with_plain_tab()
            .with_child(RouteDescriptor::new("posts/:post").with_type("post").with_plain_tab()),
        RouteDescriptor::new("/search").with_type("search").with_plain_tab(),
    ])
    .unwrap()
}

#[test]
fn removal_cascades_to_more_specific_nested_tabs() {
    let mut h = harness(post_routes());
    for location in ["/users/1", "/users/1/posts/9", "/users/2", "/search"] {
        h.engine.location_changed(location);
    }
    assert_eq!(
        h.tab_names(),
        vec![
            "user(id=1)",
            "user(id=1, post=9)",
            "post(id=1, post=9)",
            "user(id=2)",
            "search"
        ]
    );
    h.take_events();

    h.engine.remove(&user("1")).unwrap();

    assert_eq!(h.tab_names(), vec!["user(id=2)", "search"]);
    assert_eq!(
        h.take_events(),
        vec![
            "remove user(id=1)",
            "remove user(id=1, post=9)",
            "remove post(id=1, post=9)"
        ]
    );
}

#[test]
fn removing_nested_tab_keeps_less_specific_tabs() {
    let mut h = harness(post_routes());
    for location in ["/users/1", "/users/1/posts/9", "/search"] {
        h.engine.location_changed(location);
    }

    h.engine
        .remove(&tab("post", &[("id", "1"), ("post", "9")]))
        .unwrap();
    // The user tab opened at the post location carries the post param too
    assert_eq!(h.tab_names(), vec!["user(id=1)", "search"]);
}

#[test]
fn tabs_without_params_or_query_never_cascade() {
    let mut h = harness(simple_routes());
    h.engine.location_changed("/");
    h.engine.location_changed("/users/1");
    h.engine.location_changed("/users/2");

    h.engine.remove(&user("1")).unwrap();
    assert_eq!(h.tab_names(), vec!["home", "user(id=2)"]);
}

// ============================================================================
// Explicit navigation
// ============================================================================

#[test]
fn change_navigates_to_generated_url() {
    let mut h = harness(simple_routes());
    assert!(h.engine.change(&user("5")));

    assert_eq!(h.navigations(), vec!["/users/5"]);
    assert_eq!(h.active_name().as_deref(), Some("user(id=5)"));
    assert_eq!(h.take_events(), vec!["add user(id=5)", "focus user(id=5)"]);
}

#[test]
fn change_carries_query() {
    let mut h = harness(simple_routes());
    assert!(h.engine.change(&tab("search", &[]).with_query("q", "rust lang")));
    assert_eq!(h.navigations(), vec!["/search?q=rust+lang"]);
    assert_eq!(h.engine.query().get("q").map(String::as_str), Some("rust lang"));
}

#[test]
fn change_to_unknown_type_is_a_noop() {
    let mut h = harness(simple_routes());
    assert!(!h.engine.change(&tab("ghost", &[])));
    assert!(h.navigations().is_empty());
}

#[test]
fn move_tab_reorders_and_persists() {
    let mut h = harness(simple_routes());
    for location in ["/users/1", "/users/2", "/"] {
        h.engine.location_changed(location);
    }

    assert!(h.engine.move_tab(&tab("home", &[]), 0));
    assert_eq!(h.tab_names(), vec!["home", "user(id=1)", "user(id=2)"]);

    let stored = router_tabs::store::TabStore::get(&common::store_over(&h.storage));
    let types: Vec<String> = stored.into_iter().map(|r| r.tab_type).collect();
    assert_eq!(types, vec!["home", "user", "user"]);
}

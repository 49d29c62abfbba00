//! Tests for resolving path templates against snapshots.

use std::collections::BTreeMap;

use preview_links::{FieldValue, Snapshot, parse_path_template, resolve, resolve_str, snapshot};

// =============================================================================
// Substitution
// =============================================================================

#[test]
fn resolves_single_placeholder() {
    let s = snapshot! { "en"; "slug" => "hello" };
    assert_eq!(resolve_str("/posts/$slug", &s), "/posts/hello");
}

#[test]
fn resolves_every_occurrence() {
    let s = snapshot! { "en"; "a" => "x", "b" => "y" };
    assert_eq!(resolve_str("$a/$b-$a", &s), "x/y-x");
}

#[test]
fn resolves_scalars() {
    let s = snapshot! { "en"; "id" => 42, "ratio" => 1.5, "featured" => true };
    assert_eq!(
        resolve_str("/$id/$ratio/$featured", &s),
        "/42/1.5/true"
    );
}

#[test]
fn static_template_is_unchanged() {
    let s = snapshot! { "en"; "slug" => "hello" };
    assert_eq!(resolve_str("/about", &s), "/about");
    assert_eq!(resolve_str("", &s), "");
}

// =============================================================================
// Unresolved placeholders
// =============================================================================

#[test]
fn missing_value_leaves_token() {
    let s = Snapshot::new("en");
    assert_eq!(resolve_str("/posts/$slug", &s), "/posts/$slug");
}

#[test]
fn partial_snapshot_resolves_what_it_can() {
    let s = snapshot! { "en"; "category" => "news" };
    assert_eq!(resolve_str("/$category/$slug", &s), "/news/$slug");
}

#[test]
fn null_value_leaves_token() {
    let mut s = Snapshot::new("en");
    s.set("slug", FieldValue::Null);
    assert_eq!(resolve_str("/posts/$slug", &s), "/posts/$slug");
}

#[test]
fn unlocalized_value_leaves_token() {
    let mut s = Snapshot::new("en");
    s.set(
        "slug",
        FieldValue::Localized(BTreeMap::from([("en".to_string(), "hi".to_string())])),
    );
    assert_eq!(resolve_str("/posts/$slug", &s), "/posts/$slug");
}

#[test]
fn malformed_dollars_stay_literal() {
    let s = snapshot! { "en"; "slug" => "hello" };
    assert_eq!(resolve_str("/$/$slug/$9", &s), "/$/hello/$9");
}

// =============================================================================
// Idempotence and no re-scanning
// =============================================================================

#[test]
fn resolving_twice_gives_same_result() {
    let t = parse_path_template("/$category/$slug");
    let s = snapshot! { "en"; "category" => "news", "slug" => "launch" };
    let first = resolve(&t, &s);
    let second = resolve(&t, &s);
    assert_eq!(first, second);
    assert_eq!(first, "/news/launch");
}

#[test]
fn substituted_text_is_not_rescanned() {
    let s = snapshot! { "en"; "a" => "$b", "b" => "oops" };
    assert_eq!(resolve_str("/$a/$b", &s), "/$b/oops");
}

#[test]
fn value_equal_to_own_token_is_stable() {
    let s = snapshot! { "en"; "slug" => "$slug" };
    assert_eq!(resolve_str("/$slug/$slug", &s), "/$slug/$slug");
}

#[test]
fn longer_name_is_not_confused_with_prefix() {
    let s = snapshot! { "en"; "slug" => "short", "slug_full" => "long" };
    assert_eq!(resolve_str("/$slug_full/$slug", &s), "/long/short");
}

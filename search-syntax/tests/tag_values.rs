mod common;
use common::*;

#[test]
fn repeated_keys_accumulate_in_order() {
    let query = parse("is:unresolved is:assigned");
    assert_eq!(query.tag_values("is"), ["unresolved", "assigned"]);
}

#[test]
fn quoted_values_are_stored_unquoted() {
    let query = parse("user:\"John Doe\"");
    assert_eq!(query.tag_values("user"), ["John Doe"]);
}

#[test]
fn absent_keys_have_no_values() {
    let query = parse("is:unresolved");
    assert!(query.tag_values("release").is_empty());
    assert!(!query.has_tag("release"));
    assert!(query.has_tag("is"));
}

#[test]
fn add_tag_values_appends_to_both_structures() {
    let mut query = parse("is:unresolved");
    query.add_tag_values("release", ["1.0", "2.0"]);
    query.add_tag_values("release", ["3.0"]);

    assert_eq!(query.tag_values("release"), ["1.0", "2.0", "3.0"]);
    assert_eq!(tag_count(&query, "release"), 3);
    assert_eq!(query.to_query_string(), "is:unresolved release:1.0 release:2.0 release:3.0");
}

#[test]
fn set_tag_values_replaces_existing_conditions() {
    let mut query = parse("is:unresolved is:assigned browser:firefox");
    query.set_tag_values("is", ["ignored"]);

    assert_eq!(query.tag_values("is"), ["ignored"]);
    assert_eq!(tag_count(&query, "is"), 1);
    // Untouched tags keep their place; replacements append at the end.
    assert_eq!(query.to_query_string(), "browser:firefox is:ignored");
}

#[test]
fn tag_keys_follow_first_appearance() {
    let query = parse("browser:firefox is:unresolved browser:chrome device:ios");
    assert_eq!(query.tag_keys(), ["browser", "is", "device"]);
}

#[test]
fn copies_edit_independently() {
    let original = parse("is:unresolved");
    let mut copy = original.clone();
    copy.add_tag_values("is", ["assigned"]);

    assert_eq!(original.tag_values("is"), ["unresolved"]);
    assert_eq!(copy.tag_values("is"), ["unresolved", "assigned"]);
}

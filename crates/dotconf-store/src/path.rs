//! Dot-notation access into nested documents.
//!
//! A path such as `twig.cache` addresses the `cache` key of the mapping stored
//! under `twig`. Every function here branches explicitly on whether a value is
//! a mapping; sequences and scalars are never indexed into.
//!
//! Paths must be non-empty. Operations on a whole document are handled by
//! [`NamespaceStore`](crate::NamespaceStore) before it reaches this module.

use crate::value::Document;
use serde_json::Value;

/// Split off the last segment: `a.b.c` becomes `(Some("a.b"), "c")`.
fn split_leaf(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    }
}

/// Split off the first segment: `a.b.c` becomes `("a", Some("b.c"))`.
fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// Walk `parents` and return the mapping they lead to, if every step is a mapping.
fn descend<'a>(doc: &'a Document, parents: Option<&str>) -> Option<&'a Document> {
    let Some(parents) = parents else {
        return Some(doc);
    };
    parents
        .split('.')
        .try_fold(doc, |map, segment| map.get(segment)?.as_object())
}

fn descend_mut<'a>(doc: &'a mut Document, parents: Option<&str>) -> Option<&'a mut Document> {
    let Some(parents) = parents else {
        return Some(doc);
    };
    parents
        .split('.')
        .try_fold(doc, |map, segment| map.get_mut(segment)?.as_object_mut())
}

/// Look up the value at `path`.
///
/// Returns `None` as soon as a segment is missing or an intermediate value is
/// not a mapping. A stored `null` is returned as `Some(&Value::Null)`.
pub fn get<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let (parents, leaf) = split_leaf(path);
    descend(doc, parents)?.get(leaf)
}

/// Look up the value at `path`, returning a copy of it or `fallback` when it cannot be reached.
pub fn get_or(doc: &Document, path: &str, fallback: Value) -> Value {
    get(doc, path).cloned().unwrap_or(fallback)
}

/// Assign `value` at `path`, creating intermediate mappings as needed.
///
/// An intermediate key that is missing, or that holds anything other than a
/// mapping, is overwritten with a fresh empty mapping before descending.
/// This always succeeds and returns `true`.
pub fn set(doc: &mut Document, path: &str, value: Value) -> bool {
    let (head, rest) = split_head(path);
    set_segments(doc, head, rest, value);
    true
}

fn set_segments(map: &mut Document, segment: &str, rest: Option<&str>, value: Value) {
    let Some(rest) = rest else {
        map.insert(segment.to_string(), value);
        return;
    };

    let (next, tail) = split_head(rest);
    match map.get_mut(segment) {
        Some(Value::Object(child)) => set_segments(child, next, tail, value),
        _ => {
            let mut child = Document::new();
            set_segments(&mut child, next, tail, value);
            map.insert(segment.to_string(), Value::Object(child));
        }
    }
}

/// Whether the key at `path` is present.
///
/// This checks key presence only: a key explicitly holding `null` exists.
pub fn exists(doc: &Document, path: &str) -> bool {
    let (parents, leaf) = split_leaf(path);
    descend(doc, parents).is_some_and(|container| container.contains_key(leaf))
}

/// Remove the key at `path`.
///
/// Always returns `true`, whether or not anything was removed. When an
/// intermediate segment is missing or is not a mapping there is nothing to
/// delete and the document is left untouched.
pub fn delete(doc: &mut Document, path: &str) -> bool {
    let (parents, leaf) = split_leaf(path);
    if let Some(container) = descend_mut(doc, parents) {
        container.remove(leaf);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("test document must be a mapping, got {other}"),
        }
    }

    fn app() -> Document {
        doc(json!({
            "name": "MyApp",
            "debug": null,
            "twig": { "cache": "/tmp/twig", "auto": true },
            "locales": ["en", "fr"],
            "port": 8080
        }))
    }

    #[test]
    fn test_get_top_level_and_nested() {
        let app = app();
        assert_eq!(get(&app, "name"), Some(&json!("MyApp")));
        assert_eq!(get(&app, "twig.cache"), Some(&json!("/tmp/twig")));
        assert_eq!(get(&app, "twig"), Some(&json!({ "cache": "/tmp/twig", "auto": true })));
    }

    #[test]
    fn test_get_missing_returns_fallback() {
        let app = app();
        assert_eq!(get_or(&app, "missing", json!("fallback")), json!("fallback"));
        assert_eq!(get_or(&app, "twig.missing", json!(0)), json!(0));
        assert_eq!(get_or(&app, "missing.deeper.still", Value::Null), Value::Null);
    }

    #[test]
    fn test_get_through_scalar_or_sequence_returns_fallback() {
        let app = app();
        assert_eq!(get_or(&app, "port.number", json!("fb")), json!("fb"));
        assert_eq!(get_or(&app, "name.length", json!("fb")), json!("fb"));
        // Sequences are not indexed by position.
        assert_eq!(get_or(&app, "locales.0", json!("fb")), json!("fb"));
    }

    #[test]
    fn test_stored_null_exists_but_reads_as_null() {
        let d = doc(json!({ "x": null }));
        assert!(exists(&d, "x"));
        assert_eq!(get_or(&d, "x", Value::Null), Value::Null);
        assert_eq!(get(&d, "x"), Some(&Value::Null));
        assert!(!exists(&d, "y"));
    }

    #[test]
    fn test_falsy_values_exist() {
        let d = doc(json!({ "flags": { "off": false, "zero": 0, "empty": "" } }));
        assert!(exists(&d, "flags.off"));
        assert!(exists(&d, "flags.zero"));
        assert!(exists(&d, "flags.empty"));
    }

    #[test]
    fn test_exists_through_non_mapping_is_false() {
        let app = app();
        assert!(exists(&app, "twig.auto"));
        assert!(!exists(&app, "twig.auto.deeper"));
        assert!(!exists(&app, "locales.0"));
        assert!(!exists(&app, "nope.nope"));
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut d = Document::new();
        assert!(set(&mut d, "a.b.c", json!("v")));
        assert_eq!(get(&d, "a.b.c"), Some(&json!("v")));
        assert_eq!(Value::Object(d), json!({ "a": { "b": { "c": "v" } } }));
    }

    #[test]
    fn test_set_overwrites_scalar_intermediate() {
        let mut d = doc(json!({ "a": 5 }));
        assert!(set(&mut d, "a.b", json!(1)));
        assert_eq!(Value::Object(d), json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn test_set_overwrites_sequence_intermediate() {
        let mut d = doc(json!({ "a": [1, 2, 3] }));
        set(&mut d, "a.b", json!(true));
        assert_eq!(Value::Object(d), json!({ "a": { "b": true } }));
    }

    #[test]
    fn test_set_keeps_sibling_keys() {
        let mut d = app();
        set(&mut d, "twig.cache", json!(false));
        assert_eq!(get(&d, "twig.cache"), Some(&json!(false)));
        assert_eq!(get(&d, "twig.auto"), Some(&json!(true)));
        assert_eq!(get(&d, "name"), Some(&json!("MyApp")));
    }

    #[test]
    fn test_set_replaces_existing_mapping_leaf() {
        let mut d = app();
        set(&mut d, "twig", json!("flat"));
        assert_eq!(get(&d, "twig"), Some(&json!("flat")));
        assert!(!exists(&d, "twig.cache"));
    }

    #[test]
    fn test_delete_removes_key() {
        let mut d = app();
        assert!(delete(&mut d, "twig.auto"));
        assert!(!exists(&d, "twig.auto"));
        assert!(exists(&d, "twig.cache"));
    }

    #[test]
    fn test_delete_missing_leaf_reports_success() {
        let mut d = app();
        let before = d.clone();
        assert!(delete(&mut d, "twig.missing"));
        assert_eq!(d, before);
    }

    #[test]
    fn test_delete_through_non_mapping_is_noop_success() {
        let mut d = doc(json!({ "a": 5 }));
        let before = d.clone();
        assert!(delete(&mut d, "a.b"));
        assert_eq!(d, before);

        let mut d = doc(json!({ "a": {} }));
        let before = d.clone();
        assert!(delete(&mut d, "a.b"));
        assert_eq!(d, before);

        let mut d = doc(json!({}));
        assert!(delete(&mut d, "a.b"));
        assert!(d.is_empty());

        let mut d = doc(json!({ "a": { "b": [1, 2] } }));
        let before = d.clone();
        assert!(delete(&mut d, "a.b.c.d"));
        assert_eq!(d, before);
    }

    #[test]
    fn test_empty_segments_are_literal_keys() {
        let mut d = Document::new();
        set(&mut d, "a..b", json!(1));
        assert_eq!(Value::Object(d.clone()), json!({ "a": { "": { "b": 1 } } }));
        assert!(exists(&d, "a..b"));
    }
}

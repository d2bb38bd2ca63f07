//! Slash-delimited path queries over a JSON tree.
//!
//! Paths are split on `/` and empty segments are dropped, so `"/a//b/"` and
//! `"a/b"` are the same path. A segment addresses an object key, or an array
//! position when it is all digits (optionally prefixed with `-`, counting
//! from the end). A `*` segment fans out over every element of an array or
//! every value of an object.
//!
//! | Query | Result |
//! |-------|--------|
//! | [`find`] | the single node at the path, or `None` |
//! | [`find_all`] | every node matched through wildcards, `Some(vec![])` when a wildcard matched nothing |
//! | [`query`] | dispatches to one of the above depending on `*` |
//!
//! Every query refuses paths longer than [`MAX_PATH_DEPTH`] segments.
//!
//! # Example
//! ```rust
//! use jsonmodel::path;
//! use serde_json::json;
//!
//! let tree = json!({"users": [{"name": "a"}, {"name": "b"}]});
//!
//! assert_eq!(path::find(&tree, "users/-1/name"), Some(&json!("b")));
//! assert_eq!(path::find_all(&tree, "users/*/name").unwrap().len(), 2);
//! assert_eq!(path::find(&tree, "users/5/name"), None);
//! ```

use serde_json::{Map, Value};

/// Maximum number of segments accepted in one path.
pub const MAX_PATH_DEPTH: usize = 100;

/// The wildcard segment.
pub const WILDCARD: &str = "*";

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Parse an array-index segment: all digits, optionally prefixed with `-`.
pub fn parse_index(segment: &str) -> Option<i64> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Resolve a signed index against a length; negative indices count from the end.
fn resolve_index(len: usize, index: i64) -> Option<usize> {
    if index >= 0 {
        let index = usize::try_from(index).ok()?;
        (index < len).then_some(index)
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

fn within_depth(path: &str, count: usize) -> bool {
    if count > MAX_PATH_DEPTH {
        tracing::warn!(
            path,
            segments = count,
            limit = MAX_PATH_DEPTH,
            "path query exceeded maximum depth"
        );
        return false;
    }
    true
}

/// Step from `node` through a single segment.
fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Array(items) => {
            let index = parse_index(segment)?;
            items.get(resolve_index(items.len(), index)?)
        }
        Value::Object(map) => map.get(segment),
        _ => None,
    }
}

fn find_segments<'a>(tree: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = tree;
    for segment in segments {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Find the single node at `path`.
///
/// `null` in the middle of a path ends the walk with `None`; `null` as the
/// final node is returned as a present value. An empty path returns `tree`.
pub fn find<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = segments(path);
    if !within_depth(path, segments.len()) {
        return None;
    }
    find_segments(tree, &segments)
}

/// Find every node matched by a wildcard `path`.
///
/// Returns `None` when the path does not exist and `Some(vec![])` when it
/// exists but a wildcard expanded to zero elements.
pub fn find_all<'a>(tree: &'a Value, path: &str) -> Option<Vec<&'a Value>> {
    let segments = segments(path);
    if segments.is_empty() || !within_depth(path, segments.len()) {
        return None;
    }

    let mut results = vec![tree];
    let mut after_wildcard = false;

    for (index, segment) in segments.iter().enumerate() {
        let mut next = Vec::new();

        if *segment == WILDCARD {
            let mut expanded = false;
            for node in &results {
                match node {
                    Value::Array(items) => next.extend(items.iter()),
                    Value::Object(map) => next.extend(map.values()),
                    _ => continue,
                }
                expanded = true;
            }
            // A wildcard over scalars matches nothing that exists.
            if !results.is_empty() {
                after_wildcard = expanded;
            }
        } else if !results.is_empty() {
            next.extend(results.iter().filter_map(|node| step(node, segment)));
            after_wildcard = false;
        }

        if index == segments.len() - 1 {
            return Some(next);
        }

        // An empty set is only legitimate when a wildcard produced it.
        if next.is_empty() && !after_wildcard {
            return None;
        }

        results = next;
    }

    Some(results)
}

/// Resolve `path` with [`find_all`] when it contains a wildcard and with
/// [`find`] otherwise. Wildcard matches are collected into an array node.
pub fn query(tree: &Value, path: &str) -> Option<Value> {
    if path.contains(WILDCARD) {
        find_all(tree, path).map(|nodes| Value::Array(nodes.into_iter().cloned().collect()))
    } else {
        find(tree, path).cloned()
    }
}

/// Write `value` at `path`, creating intermediate containers.
///
/// Plain segments create objects and index segments create arrays, padding
/// with `null`. A negative index on an array that is too short pads at the
/// front. A `*` segment writes the elements of an array value to the
/// matching positions; any other non-null value is written as a single
/// element, and `null` only makes sure the container exists. Existing nodes
/// of the wrong kind are replaced. Paths deeper than [`MAX_PATH_DEPTH`] are
/// ignored.
pub fn insert(tree: &mut Value, path: &str, value: Value) {
    let segments = segments(path);
    if !within_depth(path, segments.len()) {
        return;
    }
    insert_segments(tree, &segments, value);
}

fn insert_segments(tree: &mut Value, segments: &[&str], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *tree = value;
        return;
    };

    if *segment == WILDCARD {
        let items = ensure_array(tree);
        let elements = match value {
            Value::Array(elements) => elements,
            Value::Null => return,
            other => vec![other],
        };
        for (index, element) in elements.into_iter().enumerate() {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            insert_segments(&mut items[index], rest, element);
        }
        return;
    }

    if let Some(index) = parse_index(segment) {
        let items = ensure_array(tree);
        let position = if index >= 0 {
            let position = usize::try_from(index).unwrap_or(usize::MAX);
            if position >= MAX_ARRAY_PAD {
                return;
            }
            if items.len() <= position {
                items.resize(position + 1, Value::Null);
            }
            position
        } else {
            let back = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
            if back > MAX_ARRAY_PAD {
                return;
            }
            if items.len() < back {
                let missing = back - items.len();
                items.splice(0..0, std::iter::repeat_n(Value::Null, missing));
            }
            items.len() - back
        };
        insert_segments(&mut items[position], rest, value);
        return;
    }

    let map = ensure_object(tree);
    let child = map.entry(segment.to_string()).or_insert(Value::Null);
    insert_segments(child, rest, value);
}

/// Upper bound on array padding created by a single index segment.
const MAX_ARRAY_PAD: usize = 1 << 16;

fn ensure_array(node: &mut Value) -> &mut Vec<Value> {
    if !node.is_array() {
        *node = Value::Array(Vec::new());
    }
    match node {
        Value::Array(items) => items,
        _ => unreachable!("node was just replaced with an array"),
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_array() -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(any::<i64>(), 1..40)
    }

    proptest! {
        /// Non-negative indices address elements directly.
        #[test]
        fn prop_index_addresses_element(items in arb_array(), seed in any::<usize>()) {
            let i = seed % items.len();
            let tree = json!(items.clone());
            prop_assert_eq!(find(&tree, &i.to_string()), Some(&json!(items[i])));
        }

        /// `-1` is the last element and `-(n+1)` is out of range.
        #[test]
        fn prop_negative_index(items in arb_array()) {
            let n = items.len();
            let tree = json!(items.clone());
            prop_assert_eq!(find(&tree, "-1"), Some(&json!(items[n - 1])));
            let past_front = format!("-{}", n + 1);
            prop_assert_eq!(find(&tree, &past_front), None);
            let past_end = n.to_string();
            prop_assert_eq!(find(&tree, &past_end), None);
        }

        /// Keys not present in an object are absent.
        #[test]
        fn prop_absent_key(keys in proptest::collection::btree_set("[a-z]{1,8}", 0..10), probe in "[A-Z]{1,8}") {
            let map: Map<String, Value> = keys.into_iter().map(|k| (k, json!(1))).collect();
            let tree = Value::Object(map);
            prop_assert_eq!(find(&tree, &probe), None);
            prop_assert_eq!(find_all(&tree, &format!("{probe}/*")), None);
        }

        /// Paths longer than the depth limit are rejected whatever the tree.
        #[test]
        fn prop_depth_bound(extra in 1usize..20, wildcard in any::<bool>()) {
            let tree = json!({"a": {"a": {"a": 1}}});
            let mut parts = vec!["a"; MAX_PATH_DEPTH + extra];
            if wildcard {
                parts[1] = WILDCARD;
            }
            prop_assert_eq!(query(&tree, &parts.join("/")), None);
        }

        /// Whatever `insert` writes at a plain path, `find` reads back.
        #[test]
        fn prop_insert_find(path in proptest::collection::vec("[a-z]{1,6}", 1..8), value in any::<i64>()) {
            let path = path.join("/");
            let mut tree = Value::Null;
            insert(&mut tree, &path, json!(value));
            prop_assert_eq!(find(&tree, &path), Some(&json!(value)));
        }
    }
}

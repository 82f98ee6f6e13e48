//! Path resolution: walk a [`Segment`] path down through objects and arrays.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::Segment;

/// Position in `current` that `segment` selects, or `None` if the segment
/// does not fit the container.
///
/// Objects only take keys, whatever their spelling. Arrays take index
/// segments and keys that spell a canonical integer.
fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment.as_key()?),
        Value::Array(arr) => arr.get(segment.as_index()?),
        _ => None,
    }
}

fn step_mut<'a>(current: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => map.get_mut(segment.as_key()?),
        Value::Array(arr) => arr.get_mut(segment.as_index()?),
        _ => None,
    }
}

/// Walk `path[from..]` starting at `current`. Errors report positions in the
/// whole of `path`.
fn walk<'a>(mut current: &'a Value, path: &[Segment], from: usize) -> Result<&'a Value, Error> {
    for (failed_at, segment) in path.iter().enumerate().skip(from) {
        current = match step(current, segment) {
            Some(next) => next,
            None => {
                tracing::trace!(failed_at, "path resolution stopped");
                return Err(Error::path(path, failed_at));
            }
        };
    }
    Ok(current)
}

fn walk_mut<'a>(
    mut current: &'a mut Value,
    path: &[Segment],
    from: usize,
) -> Result<&'a mut Value, Error> {
    for (failed_at, segment) in path.iter().enumerate().skip(from) {
        current = match step_mut(current, segment) {
            Some(next) => next,
            None => return Err(Error::path(path, failed_at)),
        };
    }
    Ok(current)
}

/// Resolve `path` inside `val`.
///
/// An empty path resolves to `val` itself. Any missing key, out-of-range
/// index, mismatched segment, or scalar in container position stops the walk
/// with [`Error::Path`] naming the full path and the failing position.
///
/// # Example
///
/// ```
/// use jq_json::{path, resolve};
/// use serde_json::json;
///
/// let doc = json!({"d": ["blah", "test"]});
/// assert_eq!(resolve(&doc, &path!["d", 1]).unwrap(), &json!("test"));
/// assert!(resolve(&doc, &path!["d", 2]).is_err());
/// ```
pub fn resolve<'a>(val: &'a Value, path: &[Segment]) -> Result<&'a Value, Error> {
    walk(val, path, 0)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(val: &'a mut Value, path: &[Segment]) -> Result<&'a mut Value, Error> {
    walk_mut(val, path, 0)
}

/// Resolve a non-empty `path` below a root object. The first segment must
/// name a member of `root`; an empty path names no member and fails at 0.
pub(crate) fn resolve_member<'a>(
    root: &'a Map<String, Value>,
    path: &[Segment],
) -> Result<&'a Value, Error> {
    let member = path
        .first()
        .and_then(Segment::as_key)
        .and_then(|key| root.get(key))
        .ok_or_else(|| Error::path(path, 0))?;
    walk(member, path, 1)
}

pub(crate) fn resolve_member_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &[Segment],
) -> Result<&'a mut Value, Error> {
    let member = path
        .first()
        .and_then(Segment::as_key)
        .and_then(|key| root.get_mut(key))
        .ok_or_else(|| Error::path(path, 0))?;
    walk_mut(member, path, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    fn failed_at(result: Result<&Value, Error>) -> usize {
        match result {
            Err(Error::Path { failed_at, .. }) => failed_at,
            other => panic!("expected path error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_path_is_root() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(&doc, &[]).unwrap(), &doc);
    }

    #[test]
    fn test_object_key() {
        let doc = json!({"foo": "bar"});
        assert_eq!(resolve(&doc, &path!["foo"]).unwrap(), &json!("bar"));
        assert_eq!(failed_at(resolve(&doc, &path!["missing"])), 0);
    }

    #[test]
    fn test_nested() {
        let doc = json!({"foo": {"bar": {"baz": "qux"}}});
        assert_eq!(
            resolve(&doc, &path!["foo", "bar", "baz"]).unwrap(),
            &json!("qux")
        );
        assert_eq!(failed_at(resolve(&doc, &path!["foo", "nope", "baz"])), 1);
    }

    #[test]
    fn test_array_element() {
        let doc = json!({"a": [1, 2, 3]});
        assert_eq!(resolve(&doc, &path!["a", 0]).unwrap(), &json!(1));
        assert_eq!(resolve(&doc, &path!["a", 2]).unwrap(), &json!(3));
        assert_eq!(failed_at(resolve(&doc, &path!["a", 3])), 1);
        assert_eq!(failed_at(resolve(&doc, &path!["a", -1])), 1);
    }

    #[test]
    fn test_numeric_key_indexes_array() {
        let doc = json!({"a": [1, 2, 3]});
        assert_eq!(resolve(&doc, &path!["a", "1"]).unwrap(), &json!(2));
        assert_eq!(failed_at(resolve(&doc, &path!["a", "01"])), 1);
        assert_eq!(failed_at(resolve(&doc, &path!["a", "x"])), 1);
    }

    #[test]
    fn test_index_never_selects_object_member() {
        let doc = json!({"0": "zero"});
        assert_eq!(resolve(&doc, &path!["0"]).unwrap(), &json!("zero"));
        assert_eq!(failed_at(resolve(&doc, &path![0])), 0);
    }

    #[test]
    fn test_scalar_in_container_position() {
        let doc = json!({"a": true});
        assert_eq!(failed_at(resolve(&doc, &path!["a", "b"])), 1);
    }

    #[test]
    fn test_explicit_null_resolves() {
        let doc = json!({"foo": null});
        assert_eq!(resolve(&doc, &path!["foo"]).unwrap(), &Value::Null);
    }

    #[test]
    fn test_resolve_mut() {
        let mut doc = json!({"a": {"b": [1, 2, 3]}});
        *resolve_mut(&mut doc, &path!["a", "b", 1]).unwrap() = json!(20);
        assert_eq!(doc, json!({"a": {"b": [1, 20, 3]}}));
        assert!(resolve_mut(&mut doc, &path!["a", "c"]).is_err());
    }

    #[test]
    fn test_error_carries_full_path() {
        let doc = json!({"e": {}});
        let err = resolve(&doc, &path!["e", "asdf", "blah"]).unwrap_err();
        assert_eq!(err.to_string(), "key [e asdf blah] not found at segment 1");
    }

    #[test]
    fn test_member_of_root_map() {
        let root = json!({"e": {"list": [1, 2]}, "0": "zero"});
        let map = root.as_object().unwrap();
        assert_eq!(
            resolve_member(map, &path!["e", "list", 1]).unwrap(),
            &json!(2)
        );
        assert_eq!(resolve_member(map, &path!["0"]).unwrap(), &json!("zero"));
        assert_eq!(failed_at(resolve_member(map, &path![0])), 0);
        assert_eq!(failed_at(resolve_member(map, &path!["e", "list", 2])), 2);
        assert_eq!(failed_at(resolve_member(map, &[])), 0);
    }

    #[test]
    fn test_member_mut_reports_whole_path() {
        let mut map = Map::new();
        map.insert("a".to_owned(), json!({"b": []}));
        resolve_member_mut(&mut map, &path!["a", "b"])
            .unwrap()
            .as_array_mut()
            .unwrap()
            .push(json!(1));
        assert_eq!(map["a"], json!({"b": [1]}));
        let err = resolve_member_mut(&mut map, &path!["a", "c", "d"]).unwrap_err();
        assert_eq!(err.to_string(), "key [a c d] not found at segment 1");
    }
}

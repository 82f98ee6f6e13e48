//! Writes into a [`Document`]: `set`, `append` and `clear`.
//!
//! A write at depth `n` rebuilds the parent container with the new leaf and
//! then sets that container at depth `n - 1`, repeating until the root is
//! reached. Every check that can fail runs before the first container is
//! touched, so a failed write leaves the document exactly as it was.

use serde_json::{Map, Value};

use crate::coerce::Coerce;
use crate::document::Document;
use crate::error::{kind_name, Error};
use crate::resolve::resolve_member_mut;
use crate::types::Segment;

impl Document {
    /// Reset to an empty document.
    pub fn clear(&mut self) {
        self.root = Map::new();
    }

    /// Write `value` at `path`.
    ///
    /// - An empty path replaces the whole document and `value` must be an
    ///   object ([`Error::ValueType`] otherwise).
    /// - A one-segment path writes a top-level key, creating it if needed.
    /// - A longer path requires its parent to exist. An object parent takes
    ///   any key; an array parent takes an index up to its length, where the
    ///   length itself appends.
    ///
    /// # Example
    ///
    /// ```
    /// use jq_json::{path, Document};
    ///
    /// let mut doc = Document::parse(r#"{"d": ["blah", "test"]}"#).unwrap();
    /// doc.set("asdf", &path!["d", 0]).unwrap();
    /// assert_eq!(doc.get::<Vec<String>>(&path!["d"]), vec!["asdf", "test"]);
    /// assert!(doc.set("x", &path!["d", "badkey"]).is_err());
    /// ```
    pub fn set(&mut self, value: impl Into<Value>, path: &[Segment]) -> Result<(), Error> {
        self.splice(value.into(), path)
    }

    /// Append `value` to the array at `path`.
    ///
    /// Fails with the same error [`must_get_array`](Self::must_get_array)
    /// gives when `path` is missing or not an array.
    pub fn append(&mut self, value: impl Into<Value>, path: &[Segment]) -> Result<(), Error> {
        let mut arr = self.must_get_array(path)?;
        arr.push(value.into());
        self.splice(Value::Array(arr), path)
    }

    fn splice(&mut self, value: Value, path: &[Segment]) -> Result<(), Error> {
        let (last, parent_path) = match path.split_last() {
            None => return self.replace_root(value),
            Some(split) => split,
        };

        if parent_path.is_empty() {
            let key = last
                .as_key()
                .ok_or_else(|| Error::wrong_type(path, String::type_name()))?;
            tracing::trace!(key, "writing top-level key");
            self.root.insert(key.to_owned(), value);
            return Ok(());
        }

        let parent =
            resolve_member_mut(&mut self.root, parent_path).map_err(|e| widen_path(e, path))?;
        let rebuilt = rebuild(parent, last, value, path)?;
        tracing::trace!(depth = parent_path.len(), "splicing rebuilt container");
        self.splice(rebuilt, parent_path)
    }

    fn replace_root(&mut self, value: Value) -> Result<(), Error> {
        match value {
            Value::Object(map) => {
                tracing::debug!("replacing document root");
                self.root = map;
                Ok(())
            }
            other => Err(Error::ValueType {
                found: kind_name(&other),
            }),
        }
    }
}

/// Move the container out of `parent` with `value` written where `last`
/// lands. `parent` is left untouched unless the write fits.
fn rebuild(
    parent: &mut Value,
    last: &Segment,
    value: Value,
    path: &[Segment],
) -> Result<Value, Error> {
    match parent {
        Value::Object(map) => {
            let key = last
                .as_key()
                .ok_or_else(|| Error::wrong_type(path, String::type_name()))?;
            let mut map = std::mem::take(map);
            map.insert(key.to_owned(), value);
            Ok(Value::Object(map))
        }
        Value::Array(arr) => {
            let index = last
                .as_index()
                .ok_or_else(|| Error::wrong_type(path, usize::type_name()))?;
            if index > arr.len() {
                return Err(Error::path(path, path.len() - 1));
            }
            let mut arr = std::mem::take(arr);
            match arr.get_mut(index) {
                Some(slot) => *slot = value,
                None => arr.push(value),
            }
            Ok(Value::Array(arr))
        }
        _ => Err(Error::path(path, path.len() - 1)),
    }
}

/// Report a failure on a prefix of `path` against the whole path.
fn widen_path(err: Error, path: &[Segment]) -> Error {
    match err {
        Error::Path { failed_at, .. } => Error::path(path, failed_at),
        other => other,
    }
}

//! The [`Document`] type and its typed, path-addressed read accessors.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::codec::{self, EncodeOptions};
use crate::coerce::Coerce;
use crate::error::{kind_name, DecodeError, EncodeError, Error};
use crate::resolve::{resolve_member, resolve_member_mut};
use crate::types::Segment;

/// A decoded JSON document whose root is always an object.
///
/// # Example
///
/// ```
/// use jq_json::{path, Document};
///
/// let doc = Document::parse(r#"{"c": 1234, "d": ["blah", "test"]}"#).unwrap();
/// assert_eq!(doc.get::<String>(&path!["d", 0]), "blah");
/// assert_eq!(doc.get::<u8>(&path!["c"]), 210);
/// assert_eq!(doc.get_keys(&path!["d"]), vec!["0", "1"]);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) root: Map<String, Value>,
    escape_html: bool,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Document {
    /// An empty document, `{}`.
    pub fn new() -> Self {
        Document {
            root: Map::new(),
            escape_html: false,
        }
    }

    /// Decode a document. Empty text decodes to `{}`.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        Self::from_fragments([text])
    }

    /// Concatenate `fragments` and decode the result.
    ///
    /// If the concatenation is empty the document is `{}`. Anything else must
    /// be exactly one JSON object; malformed text, trailing data, or a
    /// non-object value is a [`DecodeError`].
    pub fn from_fragments<I, S>(fragments: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Document::new();
        doc.set_blob(fragments)?;
        Ok(doc)
    }

    /// Replace the whole document with freshly decoded text.
    ///
    /// On error the current contents are left untouched.
    pub fn set_blob<I, S>(&mut self, fragments: I) -> Result<(), DecodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for fragment in fragments {
            text.push_str(fragment.as_ref());
        }
        let map = if text.is_empty() {
            Map::new()
        } else {
            codec::decode(&text)?
        };
        tracing::debug!(keys = map.len(), "decoded document");
        self.root = map;
        Ok(())
    }

    /// The root object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Take the root object.
    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    /// Whether [`blob`](Self::blob) and `Display` escape `<`, `>` and `&`.
    pub fn set_escape_html(&mut self, escape_html: bool) {
        self.escape_html = escape_html;
    }

    /// Serialize with explicit options.
    pub fn encode(&self, options: &EncodeOptions) -> Result<String, EncodeError> {
        codec::encode(&self.root, options)
    }

    /// Serialize compactly, or with `indent` per level if given, honoring the
    /// document's HTML escaping setting.
    pub fn blob(&self, indent: Option<&str>) -> Result<String, EncodeError> {
        let options = EncodeOptions {
            indent: indent.map(str::to_owned),
            prefix: String::new(),
            escape_html: self.escape_html,
        };
        self.encode(&options)
    }

    // ── Typed reads ───────────────────────────────────────────────────────

    /// Resolve `path` and convert the value found there to `T`.
    ///
    /// Fails with [`Error::Path`] if the path does not resolve and with
    /// [`Error::Type`] if the value cannot be read as `T`.
    pub fn must_get<T: Coerce>(&self, path: &[Segment]) -> Result<T, Error> {
        let found = if path.is_empty() {
            T::coerce_object(&self.root)
        } else {
            T::coerce(resolve_member(&self.root, path)?)
        };
        found.ok_or_else(|| Error::wrong_type(path, T::type_name()))
    }

    /// Like [`must_get`](Self::must_get), but any failure yields `T::default()`.
    pub fn get<T: Coerce + Default>(&self, path: &[Segment]) -> T {
        self.must_get(path).unwrap_or_default()
    }

    /// Copy of the array at `path`.
    pub fn must_get_array(&self, path: &[Segment]) -> Result<Vec<Value>, Error> {
        self.must_get(path)
    }

    /// Copy of the array at `path`, or an empty vec.
    pub fn get_array(&self, path: &[Segment]) -> Vec<Value> {
        self.get(path)
    }

    /// Copy of the object at `path`.
    pub fn must_get_map(&self, path: &[Segment]) -> Result<Map<String, Value>, Error> {
        self.must_get(path)
    }

    /// Copy of the object at `path`, or an empty map.
    pub fn get_map(&self, path: &[Segment]) -> Map<String, Value> {
        self.get(path)
    }

    /// Live array at `path`, for editing in place.
    pub fn get_array_mut(&mut self, path: &[Segment]) -> Result<&mut Vec<Value>, Error> {
        if path.is_empty() {
            return Err(Error::wrong_type(path, Vec::<Value>::type_name()));
        }
        match resolve_member_mut(&mut self.root, path)? {
            Value::Array(arr) => Ok(arr),
            _ => Err(Error::wrong_type(path, Vec::<Value>::type_name())),
        }
    }

    /// Live object at `path`, for editing in place.
    pub fn get_map_mut(&mut self, path: &[Segment]) -> Result<&mut Map<String, Value>, Error> {
        if path.is_empty() {
            return Ok(&mut self.root);
        }
        match resolve_member_mut(&mut self.root, path)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::wrong_type(path, Map::<String, Value>::type_name())),
        }
    }

    /// Sub-keys of the container at `path`.
    ///
    /// Object keys are sorted ignoring ASCII case. Array positions are
    /// returned as `"0"` through `"n-1"`. A scalar has no sub-keys.
    pub fn must_get_keys(&self, path: &[Segment]) -> Result<Vec<String>, Error> {
        if path.is_empty() {
            return Ok(sorted_keys(&self.root));
        }
        match resolve_member(&self.root, path)? {
            Value::Object(map) => Ok(sorted_keys(map)),
            Value::Array(arr) => Ok((0..arr.len()).map(|i| i.to_string()).collect()),
            _ => Err(Error::NoSubKeys {
                path: path.into(),
            }),
        }
    }

    /// Like [`must_get_keys`](Self::must_get_keys), but empty on failure.
    pub fn get_keys(&self, path: &[Segment]) -> Vec<String> {
        self.must_get_keys(path).unwrap_or_default()
    }

    /// `true` if `path` resolves to a non-null value.
    pub fn has_key(&self, path: &[Segment]) -> bool {
        path.is_empty() || matches!(resolve_member(&self.root, path), Ok(v) if !v.is_null())
    }
}

fn sorted_keys(map: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort_by(|a, b| key_cmp(a, b));
    keys
}

/// ASCII case-insensitive key order, ties broken bytewise so the order is
/// total. Non-ASCII letters compare by their bytes.
fn key_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.blob(Some("  ")).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Document {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Document {
            root: map,
            escape_html: false,
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Document::from(map)),
            other => Err(Error::ValueType {
                found: kind_name(&other),
            }),
        }
    }
}

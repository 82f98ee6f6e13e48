//! Path segment and path types.

use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// A step in a document path.
///
/// A key selects a member of an object. An index selects an element of an
/// array. A key made only of digits may also index an array, see
/// [`Segment::as_index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(i64),
}

impl Segment {
    /// The key this segment selects in an object, if any.
    ///
    /// Index segments never select object members, even if the object has a
    /// key that spells the same number.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(k) => Some(k),
            Segment::Index(_) => None,
        }
    }

    /// The array position this segment selects, if any.
    ///
    /// Index segments must be non-negative. Key segments qualify when they
    /// are a canonical non-negative integer (`"0"`, `"17"`, not `"01"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => usize::try_from(*i).ok(),
            Segment::Key(k) if is_valid_index(k) => k.parse().ok(),
            Segment::Key(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_owned())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::Key(key.clone())
    }
}

impl From<i32> for Segment {
    fn from(index: i32) -> Self {
        Segment::Index(i64::from(index))
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}

impl From<u32> for Segment {
    fn from(index: u32) -> Self {
        Segment::Index(i64::from(index))
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        // Anything past i64::MAX is out of range for every real array anyway.
        Segment::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// An owned path, displayed as `[a 0 b]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<Segment>);

impl Path {
    /// Classify a loosely-typed list of JSON values into path segments.
    ///
    /// Strings become keys and integers become indices. Anything else is
    /// rejected with [`Error::InvalidSegment`] naming the whole list and the
    /// offending position.
    pub fn from_values(values: &[Value]) -> Result<Path, Error> {
        let mut segments = Vec::with_capacity(values.len());
        for (position, value) in values.iter().enumerate() {
            match Segment::try_from(value) {
                Ok(segment) => segments.push(segment),
                Err(()) => {
                    return Err(Error::InvalidSegment {
                        path: Value::Array(values.to_vec()).to_string(),
                        position,
                    })
                }
            }
        }
        Ok(Path(segments))
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }
}

impl TryFrom<&Value> for Segment {
    type Error = ();

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Segment::Key(s.clone())),
            Value::Number(n) => n.as_i64().map(Segment::Index).ok_or(()),
            _ => Err(()),
        }
    }
}

impl From<&[Segment]> for Path {
    fn from(segments: &[Segment]) -> Self {
        Path(segments.to_vec())
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path(segments)
    }
}

impl std::ops::Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

/// Check if a string is a canonical non-negative integer array index.
///
/// # Example
///
/// ```
/// use jq_json::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("1.5"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Build a path array from mixed key and index literals.
///
/// ```
/// use jq_json::{path, Segment};
///
/// let p = path!["d", 0];
/// assert_eq!(p, [Segment::Key("d".into()), Segment::Index(0)]);
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        [$($crate::Segment::from($segment)),*]
    };
}

//! Error types for decoding, encoding, and path-addressed access.

use thiserror::Error;

use crate::types::Path;

/// Failure to turn text into a [`Document`](crate::Document).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed token, invalid literal, or trailing data after the value.
    #[error("failed to decode JSON: {message}")]
    Syntax { message: String },
    /// The input stopped in the middle of a value.
    #[error("failed to decode JSON: unexpected end of input ({message})")]
    UnexpectedEof { message: String },
    /// The input was well-formed but its top-level value is not an object.
    #[error("failed to decode JSON: top-level value is {found}, not an object")]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Eof => DecodeError::UnexpectedEof {
                message: e.to_string(),
            },
            Category::Io | Category::Syntax | Category::Data => DecodeError::Syntax {
                message: e.to_string(),
            },
        }
    }
}

/// Failure to serialize a document.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode JSON: output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors returned by path-addressed operations on a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// A segment could not be resolved: missing key, index out of range, or
    /// a segment that does not fit its container.
    #[error("key {path} not found at segment {failed_at}")]
    Path { path: Path, failed_at: usize },
    /// The addressed value exists but is not of the requested type.
    #[error("key {path} is not of type {wanted}")]
    Type { path: Path, wanted: String },
    /// Key enumeration was requested on a scalar.
    #[error("key {path} has no valid sub-keys")]
    NoSubKeys { path: Path },
    /// A whole-document replacement was given something other than an object.
    #[error("value of type {found} cannot replace the document root")]
    ValueType { found: &'static str },
    /// A loosely-typed path element is neither a string nor an integer.
    #[error("path {path} has an invalid segment at position {position}")]
    InvalidSegment { path: String, position: usize },
}

impl Error {
    pub(crate) fn path(path: &[crate::Segment], failed_at: usize) -> Self {
        Error::Path {
            path: Path::from(path),
            failed_at,
        }
    }

    pub(crate) fn wrong_type(path: &[crate::Segment], wanted: impl Into<String>) -> Self {
        Error::Type {
            path: Path::from(path),
            wanted: wanted.into(),
        }
    }
}

/// Name of a value's variant, as used in error messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

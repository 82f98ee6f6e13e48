//! Path-addressed access to decoded JSON documents.
//!
//! A [`Document`] is a JSON object decoded from text. Values inside it are
//! addressed by a path of [`Segment`]s: keys walk into objects, indices walk
//! into arrays. Reads convert the addressed value to a requested Rust type
//! ([`Coerce`]), and writes rebuild every container from the written leaf
//! back up to the root.
//!
//! # Example
//!
//! ```
//! use jq_json::{path, Document};
//!
//! let mut doc = Document::parse(r#"{"a": true, "d": ["blah", "test"]}"#).unwrap();
//!
//! // Typed reads; `get` falls back to the default on any failure.
//! assert!(doc.get::<bool>(&path!["a"]));
//! assert_eq!(doc.get::<String>(&path!["d", 1]), "test");
//! assert_eq!(doc.get::<String>(&path!["a"]), "");
//! assert!(doc.must_get::<String>(&path!["a"]).is_err());
//!
//! // Writes.
//! doc.set("asdf", &path!["d", 0]).unwrap();
//! doc.append("more", &path!["d"]).unwrap();
//! assert_eq!(doc.blob(None).unwrap(), r#"{"a":true,"d":["asdf","test","more"]}"#);
//! ```

pub mod types;
pub use types::{is_valid_index, Path, Segment};

pub mod error;
pub use error::{DecodeError, EncodeError, Error};

pub mod coerce;
pub use coerce::Coerce;

mod resolve;
pub use resolve::{resolve, resolve_mut};

pub mod codec;
pub use codec::{decode, encode, EncodeOptions};

mod document;
pub use document::Document;

mod mutate;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    #[test]
    fn test_loosely_typed_path_end_to_end() {
        let doc = Document::try_from(json!({"d": ["blah", "test"]})).unwrap();
        let p = Path::from_values(&[json!("d"), json!(1)]).unwrap();
        assert_eq!(doc.get::<String>(&p), "test");
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let doc = Document::parse(r#"{"e": {"anInt": 17}}"#).unwrap();
        for _ in 0..3 {
            assert_eq!(doc.must_get::<i32>(&path!["e", "anInt"]).unwrap(), 17);
        }
    }
}

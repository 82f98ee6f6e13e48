//! Text boundary: decoding documents and encoding them with configurable
//! indentation, line prefix, and HTML escaping.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

use crate::error::{kind_name, DecodeError, EncodeError};

/// Serialization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent unit per nesting level. `None` with an empty prefix is compact.
    pub indent: Option<String>,
    /// Written at the start of every line after the first. Only a
    /// whitespace prefix leaves the output decodable.
    pub prefix: String,
    /// Escape `<`, `>` and `&` as `\u003c`, `\u003e` and `\u0026`.
    /// U+2028 and U+2029 are written as-is either way.
    pub escape_html: bool,
}

impl EncodeOptions {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    fn is_pretty(&self) -> bool {
        self.indent.is_some() || !self.prefix.is_empty()
    }
}

/// Decode `text` into a root object.
///
/// Trailing data after the first value is an error, as is a top-level value
/// that is not an object.
pub fn decode(text: &str) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject {
            found: kind_name(&other),
        }),
    }
}

/// Encode `value` according to `options`, trimming trailing whitespace.
pub fn encode<T>(value: &T, options: &EncodeOptions) -> Result<String, EncodeError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    let formatter = IndentFormatter::new(options);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut out = String::from_utf8(buf)?;
    out.truncate(out.trim_end().len());
    Ok(out)
}

/// A `serde_json` formatter that writes `prefix` + `indent * depth` at the
/// start of every element line and optionally escapes HTML-significant
/// characters.
struct IndentFormatter<'a> {
    pretty: bool,
    indent: &'a [u8],
    prefix: &'a [u8],
    escape_html: bool,
    depth: usize,
    has_value: bool,
}

impl<'a> IndentFormatter<'a> {
    fn new(options: &'a EncodeOptions) -> Self {
        IndentFormatter {
            pretty: options.is_pretty(),
            indent: options.indent.as_deref().unwrap_or("").as_bytes(),
            prefix: options.prefix.as_bytes(),
            escape_html: options.escape_html,
            depth: 0,
            has_value: false,
        }
    }

    fn newline<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"\n")?;
        writer.write_all(self.prefix)?;
        for _ in 0..self.depth {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(token)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()> {
        self.depth -= 1;
        if self.pretty && self.has_value {
            self.newline(writer)?;
        }
        writer.write_all(token)
    }

    fn element<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        if self.pretty {
            self.newline(writer)?;
        }
        Ok(())
    }
}

impl Formatter for IndentFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.element(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.element(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.pretty {
            writer.write_all(b": ")
        } else {
            writer.write_all(b":")
        }
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.escape_html {
            return writer.write_all(fragment.as_bytes());
        }
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escaped: &[u8] = match b {
                b'<' => b"\\u003c",
                b'>' => b"\\u003e",
                b'&' => b"\\u0026",
                _ => continue,
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escaped)?;
            start = i + 1;
        }
        writer.write_all(&bytes[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object() {
        let map = decode(r#"{"a": 1}"#).unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert_eq!(
            decode("[1, 2]"),
            Err(DecodeError::NotAnObject { found: "array" })
        );
        assert_eq!(
            decode("null"),
            Err(DecodeError::NotAnObject { found: "null" })
        );
    }

    #[test]
    fn test_decode_rejects_trailing_data() {
        assert!(matches!(decode("{} {}"), Err(DecodeError::Syntax { .. })));
    }

    #[test]
    fn test_decode_distinguishes_eof() {
        assert!(matches!(decode("}"), Err(DecodeError::Syntax { .. })));
        assert!(matches!(decode("{"), Err(DecodeError::UnexpectedEof { .. })));
        assert!(matches!(
            decode(r#"{"a": [1, "#),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_encode_compact() {
        let v = json!({"b": [1, 2], "a": {"x": null}});
        let out = encode(&v, &EncodeOptions::default()).unwrap();
        assert_eq!(out, r#"{"a":{"x":null},"b":[1,2]}"#);
    }

    #[test]
    fn test_encode_indent() {
        let v = json!({"a": [1, {}], "b": []});
        let out = encode(&v, &EncodeOptions::default().with_indent("  ")).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    {}\n  ],\n  \"b\": []\n}");
    }

    #[test]
    fn test_encode_prefix() {
        let v = json!({"a": [1]});
        let opts = EncodeOptions::default().with_indent("\t").with_prefix("> ");
        let out = encode(&v, &opts).unwrap();
        assert_eq!(out, "{\n> \t\"a\": [\n> \t\t1\n> \t]\n> }");
    }

    #[test]
    fn test_encode_empty_indent_still_breaks_lines() {
        let v = json!({"a": 1});
        let out = encode(&v, &EncodeOptions::default().with_indent("")).unwrap();
        assert_eq!(out, "{\n\"a\": 1\n}");
    }

    #[test]
    fn test_encode_empty_object_with_prefix() {
        let v = json!({});
        let out = encode(&v, &EncodeOptions::default().with_prefix("  ")).unwrap();
        assert_eq!(out, "{}");
    }

    #[test]
    fn test_encode_escape_html() {
        let v = json!({"<k>": "a & b <c>"});
        let plain = encode(&v, &EncodeOptions::default()).unwrap();
        assert_eq!(plain, r#"{"<k>":"a & b <c>"}"#);

        let escaped = encode(&v, &EncodeOptions::default().with_escape_html(true)).unwrap();
        assert_eq!(
            escaped,
            r#"{"\u003ck\u003e":"a \u0026 b \u003cc\u003e"}"#
        );
    }

    #[test]
    fn test_encode_escape_html_keeps_standard_escapes() {
        let v = json!({"a": "line\n\"q\"<"});
        let out = encode(&v, &EncodeOptions::default().with_escape_html(true)).unwrap();
        assert_eq!(out, r#"{"a":"line\n\"q\"\u003c"}"#);
    }

    #[test]
    fn test_encode_whitespace_prefix_decodes() {
        let v = json!({"a": [1, {"b": null}], "c": "x"});
        for prefix in ["  ", "\t"] {
            let opts = EncodeOptions::default().with_indent("  ").with_prefix(prefix);
            let out = encode(&v, &opts).unwrap();
            assert_eq!(Value::Object(decode(&out).unwrap()), v);
        }
    }

    #[test]
    fn test_encode_line_separators_unescaped() {
        let v = json!({"a": "x\u{2028}y\u{2029}z"});
        let out = encode(&v, &EncodeOptions::default().with_escape_html(true)).unwrap();
        assert_eq!(out, "{\"a\":\"x\u{2028}y\u{2029}z\"}");
    }

    #[test]
    fn test_encode_map_directly() {
        let map = decode(r#"{"b": 1, "a": 2}"#).unwrap();
        assert_eq!(encode(&map, &EncodeOptions::default()).unwrap(), r#"{"a":2,"b":1}"#);
    }
}

//! `jq-json` command-line tool: query or rewrite a JSON document by path.
//!
//! The binary in `main.rs` only parses arguments, reads stdin and prints;
//! everything testable lives here.

use clap::{Parser, Subcommand};
use jq_json::{encode, DecodeError, Document, EncodeError, EncodeOptions, Segment};
use serde_json::Value;
use thiserror::Error;

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "jq-json",
    version,
    about = "Read a JSON object from stdin, then query or rewrite it by path",
    long_about = "Read a JSON object from stdin, then query or rewrite it by path.\n\n\
                  Path segments are plain words. A segment made of digits indexes \
                  into an array; on an object it is an ordinary key."
)]
pub struct Cli {
    /// Indent unit for pretty output (compact when omitted)
    #[arg(long, global = true)]
    pub indent: Option<String>,
    /// Prefix written at the start of every output line after the first
    #[arg(long, global = true, default_value = "")]
    pub prefix: String,
    /// Escape <, > and & in strings
    #[arg(long, global = true)]
    pub escape_html: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            indent: self.indent.clone(),
            prefix: self.prefix.clone(),
            escape_html: self.escape_html,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value at a path
    Get { path: Vec<String> },
    /// Print the sub-keys of the object or array at a path, one per line
    Keys { path: Vec<String> },
    /// Print whether a path resolves to a non-null value
    Has { path: Vec<String> },
    /// Write a JSON value at a path and print the document
    Set {
        value: String,
        path: Vec<String>,
    },
    /// Append a JSON value to the array at a path and print the document
    Append {
        value: String,
        path: Vec<String>,
    },
    /// Print an empty document
    Clear,
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Document(#[from] jq_json::Error),
    #[error("invalid JSON value argument: {0}")]
    Value(serde_json::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

// ── Commands ──────────────────────────────────────────────────────────────

fn segments(path: &[String]) -> Vec<Segment> {
    path.iter().map(Segment::from).collect()
}

fn parse_value(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(CliError::Value)
}

/// Run `command` against the document in `input` and return what to print.
pub fn run(input: &str, command: &Command, options: &EncodeOptions) -> Result<String, CliError> {
    let mut doc = Document::parse(input.trim())?;
    tracing::debug!(?command, "running command");

    match command {
        Command::Get { path } => {
            let value: Value = doc.must_get(&segments(path))?;
            Ok(encode(&value, options)?)
        }
        Command::Keys { path } => Ok(doc.must_get_keys(&segments(path))?.join("\n")),
        Command::Has { path } => Ok(doc.has_key(&segments(path)).to_string()),
        Command::Set { value, path } => {
            doc.set(parse_value(value)?, &segments(path))?;
            Ok(doc.encode(options)?)
        }
        Command::Append { value, path } => {
            doc.append(parse_value(value)?, &segments(path))?;
            Ok(doc.encode(options)?)
        }
        Command::Clear => {
            doc.clear();
            Ok(doc.encode(options)?)
        }
    }
}

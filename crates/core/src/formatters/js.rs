//! Embedded-data literal output.
//!
//! Renders records as `const <name> = <pretty JSON>;`, the shape a static front end
//! loads with a plain `<script>` tag.

use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use crate::{BlogmergeError, Result};

/// Default name of the assigned identifier.
pub const DEFAULT_VARIABLE: &str = "postsData";

/// How non-ASCII characters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Written verbatim as UTF-8.
    #[default]
    Preserve,
    /// Written as lowercase `\uXXXX` escapes, using surrogate pairs above the BMP.
    Ascii,
}

/// Configuration for literal output.
#[derive(Debug, Clone)]
pub struct JsConfig {
    /// Identifier the data is assigned to.
    pub variable: String,
    pub escape: EscapeMode,
}

impl Default for JsConfig {
    fn default() -> Self {
        Self { variable: DEFAULT_VARIABLE.to_string(), escape: EscapeMode::default() }
    }
}

/// Pretty (two-space) formatter that escapes every non-ASCII character.
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, escape: EscapeMode) -> Result<String> {
    match escape {
        EscapeMode::Preserve => Ok(serde_json::to_string_pretty(value)?),
        EscapeMode::Ascii => {
            let mut buf = Vec::new();
            let formatter = AsciiFormatter { inner: PrettyFormatter::new() };
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
            String::from_utf8(buf).map_err(|e| BlogmergeError::SerializeError(e.to_string()))
        }
    }
}

/// Renders `records` as a literal assignment.
///
/// # Example
///
/// ```rust
/// use blogmerge_core::{JsConfig, PostRecord, to_js_literal};
///
/// let records = vec![PostRecord::new("標題", "內容", "https://medium.com/p/1")];
/// let js = to_js_literal(&records, &JsConfig::default()).unwrap();
/// assert!(js.starts_with("const postsData = ["));
/// assert!(js.contains("標題"));
/// ```
pub fn to_js_literal<T: Serialize>(records: &[T], config: &JsConfig) -> Result<String> {
    Ok(format!("const {} = {};", config.variable, to_json(records, config.escape)?))
}

/// Strips the assignment written by [`to_js_literal`] and parses the array back.
pub fn from_js_literal<T: DeserializeOwned>(literal: &str, variable: &str) -> Result<Vec<T>> {
    let prefix = format!("const {} = ", variable);
    let body = literal
        .trim()
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(';'))
        .ok_or_else(|| BlogmergeError::SerializeError(format!("Not a '{}' literal assignment", variable)))?;

    Ok(serde_json::from_str(body)?)
}

/// Literal formatter with configurable options.
pub struct JsFormatter {
    config: JsConfig,
}

impl JsFormatter {
    pub fn new(config: JsConfig) -> Self {
        Self { config }
    }

    pub fn render<T: Serialize>(&self, records: &[T]) -> Result<String> {
        to_js_literal(records, &self.config)
    }

    pub fn config(&self) -> &JsConfig {
        &self.config
    }
}

impl Default for JsFormatter {
    fn default() -> Self {
        Self::new(JsConfig::default())
    }
}

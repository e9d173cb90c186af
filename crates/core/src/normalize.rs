//! Script-variant text normalization.
//!
//! A [`TextNormalizer`] is built once per run from a [`ScriptTarget`] and handed to each
//! extractor by reference. Conversion uses the immutable built-in tables of `zhconv`,
//! so repeated calls with the same input always return the same output.

use std::fmt;
use std::str::FromStr;

use zhconv::{Variant, ZhConverter, get_builtin_converter};

use crate::{BlogmergeError, Result};

/// Target script for normalized titles and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptTarget {
    /// Generic traditional script (zh-Hant).
    #[default]
    Traditional,
    /// Traditional script with Taiwan phrasing (zh-TW).
    Taiwan,
    /// Traditional script with Hong Kong phrasing (zh-HK).
    HongKong,
    /// No conversion; text passes through untouched.
    Unchanged,
}

impl ScriptTarget {
    fn variant(self) -> Option<Variant> {
        match self {
            ScriptTarget::Traditional => Some(Variant::ZhHant),
            ScriptTarget::Taiwan => Some(Variant::ZhTW),
            ScriptTarget::HongKong => Some(Variant::ZhHK),
            ScriptTarget::Unchanged => None,
        }
    }
}

impl FromStr for ScriptTarget {
    type Err = BlogmergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hant" | "zh-hant" | "traditional" => Ok(Self::Traditional),
            "tw" | "zh-tw" => Ok(Self::Taiwan),
            "hk" | "zh-hk" => Ok(Self::HongKong),
            "none" | "off" => Ok(Self::Unchanged),
            _ => Err(BlogmergeError::ConfigError(format!(
                "Invalid script target: {}. Valid options: hant, tw, hk, none",
                s
            ))),
        }
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScriptTarget::Traditional => "hant",
            ScriptTarget::Taiwan => "tw",
            ScriptTarget::HongKong => "hk",
            ScriptTarget::Unchanged => "none",
        };
        f.write_str(name)
    }
}

/// Maps extracted text through a fixed script-conversion table.
///
/// # Example
///
/// ```rust
/// use blogmerge_core::{ScriptTarget, TextNormalizer};
///
/// let normalizer = TextNormalizer::new(ScriptTarget::Unchanged);
/// assert_eq!(normalizer.normalize("plain ascii"), "plain ascii");
/// ```
#[derive(Clone, Copy)]
pub struct TextNormalizer {
    target: ScriptTarget,
    converter: Option<&'static ZhConverter>,
}

impl TextNormalizer {
    /// Creates a normalizer for the given target script.
    pub fn new(target: ScriptTarget) -> Self {
        let converter = target.variant().map(get_builtin_converter);
        Self { target, converter }
    }

    pub fn target(&self) -> ScriptTarget {
        self.target
    }

    /// Converts `text` to the target script.
    ///
    /// Characters without a mapping are copied unchanged. Empty input yields an
    /// empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.converter {
            Some(converter) => converter.convert(text),
            None => text.to_string(),
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(ScriptTarget::default())
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer").field("target", &self.target).finish()
    }
}

//! Output record types.
//!
//! [`PostRecord`] is the `{title, content, link}` triple produced by both structured
//! extractors and aggregated into the final dataset. [`PageRecord`] is the
//! `{title, file, content}` shape produced by the whole-page fallback extractor.

use serde::{Deserialize, Serialize};

/// A single extracted post with a verified permalink.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Normalized post title.
    pub title: String,
    /// Normalized post body text.
    pub content: String,
    /// Canonical permalink, never empty.
    pub link: String,
}

impl PostRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>, link: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), link: link.into() }
    }
}

/// A whole-page text dump keyed by the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// First `<h1>` text, or the file name.
    pub title: String,
    /// File name within the scanned directory.
    pub file: String,
    /// Visible text of the whole document.
    pub content: String,
}

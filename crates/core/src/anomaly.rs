//! Title sanity checks.
//!
//! Feed titles are expected to carry a year such as `1911`. A missing year only
//! produces a [`Diagnostic`]; the entry is kept either way.

use regex::Regex;
use std::sync::LazyLock;

use crate::diagnostics::Diagnostic;

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

/// Returns true if `title` contains a standalone 19xx or 20xx token.
///
/// The token must sit on word boundaries, so `1949年` does not count while
/// `1949 年` and `(1949)` do.
pub fn has_year(title: &str) -> bool {
    YEAR_PATTERN.is_match(title)
}

/// Checks a feed title, returning a diagnostic when no year is present.
pub fn check_title(title: &str, link: &str) -> Option<Diagnostic> {
    if has_year(title) {
        None
    } else {
        Some(Diagnostic::TitleWithoutYear { title: title.to_string(), link: link.to_string() })
    }
}

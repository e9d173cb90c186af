//! Advisory diagnostics raised while extracting.
//!
//! Extractors never fail on a single bad entry or file. They skip it, log a
//! [`Diagnostic`] through `tracing`, and keep a copy in the returned [`Extraction`].

use std::fmt;
use std::path::PathBuf;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single advisory message about one source, entry, or file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The feed export does not exist.
    FeedNotFound { path: PathBuf },
    /// The feed export could not be read or parsed.
    FeedParseFailed { path: PathBuf, reason: String },
    /// A feed title carries no 19xx/20xx year token. The record is still kept.
    TitleWithoutYear { title: String, link: String },
    /// The document folder does not exist.
    DirectoryNotFound { path: PathBuf },
    /// A document has no content section.
    MissingContentRegion { file: String },
    /// A document has no footer.
    MissingFooter { file: String },
    /// A document footer has no permalink anchor.
    MissingPermalink { file: String },
    /// A document could not be read or queried.
    FileFailed { file: String, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::FeedNotFound { .. } | Diagnostic::FeedParseFailed { .. } | Diagnostic::FileFailed { .. } => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }

    /// Logs this diagnostic at the level matching its severity.
    pub fn emit(&self) {
        match self.severity() {
            Severity::Error => tracing::error!("{}", self),
            Severity::Warning => tracing::warn!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FeedNotFound { path } => write!(f, "Could not find feed export '{}'", path.display()),
            Diagnostic::FeedParseFailed { path, reason } => {
                write!(f, "Failed to parse feed export '{}': {}", path.display(), reason)
            }
            Diagnostic::TitleWithoutYear { title, link } => {
                write!(f, "Title without year found: '{}' (link: {})", title, link)
            }
            Diagnostic::DirectoryNotFound { path } => {
                write!(f, "Folder '{}' not found, skipping folder posts", path.display())
            }
            Diagnostic::MissingContentRegion { file } => write!(f, "No content section found in {}", file),
            Diagnostic::MissingFooter { file } => write!(f, "No footer found in {}", file),
            Diagnostic::MissingPermalink { file } => write!(f, "No permalink found in footer of {}", file),
            Diagnostic::FileFailed { file, reason } => write!(f, "Error processing {}: {}", file, reason),
        }
    }
}

/// Records pulled from one source plus everything reported along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Extraction<T> {
    pub fn new() -> Self {
        Self { records: Vec::new(), diagnostics: Vec::new() }
    }

    /// An empty extraction carrying a single diagnostic.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        let mut extraction = Self::new();
        extraction.report(diagnostic);
        extraction
    }

    /// Emits `diagnostic` and keeps it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_without_year_message() {
        let diagnostic = Diagnostic::TitleWithoutYear {
            title: "無題".to_string(),
            link: "https://newcantoniahistory.blogspot.com/p.html".to_string(),
        };
        let message = diagnostic.to_string();
        assert!(message.contains("無題"));
        assert!(message.contains("https://newcantoniahistory.blogspot.com/p.html"));
        assert_eq!(diagnostic.severity(), Severity::Warning);
    }

    #[test]
    fn test_feed_failures_are_errors() {
        let diagnostic = Diagnostic::FeedNotFound { path: PathBuf::from("missing.xml") };
        assert_eq!(diagnostic.severity(), Severity::Error);
        assert!(diagnostic.to_string().contains("missing.xml"));
    }

    #[test]
    fn test_failed_extraction_is_empty() {
        let extraction: Extraction<()> =
            Extraction::failed(Diagnostic::DirectoryNotFound { path: PathBuf::from("posts") });
        assert!(extraction.is_empty());
        assert_eq!(extraction.diagnostics.len(), 1);
    }
}

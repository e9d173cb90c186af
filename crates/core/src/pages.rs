//! Whole-page text dumps.
//!
//! A degraded sibling of [`DocumentExtractor`](crate::DocumentExtractor) for folders
//! of arbitrary pages: no content section, footer, or permalink is required. Each file
//! yields a [`PageRecord`] holding its first `<h1>`, its name, and all of its
//! visible text.

use std::path::Path;

use crate::diagnostics::{Diagnostic, Extraction};
use crate::io::{list_documents, read_source};
use crate::parse::Document;
use crate::record::PageRecord;
use crate::Result;

/// Configuration for whole-page extraction.
#[derive(Debug, Clone)]
pub struct PageDumpConfig {
    /// File extension to scan, without the dot (default: `html`).
    pub extension: String,
}

impl Default for PageDumpConfig {
    fn default() -> Self {
        Self { extension: "html".to_string() }
    }
}

/// Builds the record for one page.
pub fn extract_page(html: &str, file_name: &str) -> Result<PageRecord> {
    let doc = Document::parse(html)?;
    let title = match doc.select_first("h1")? {
        Some(heading) => heading.visible_text(),
        None => file_name.to_string(),
    };

    Ok(PageRecord { title, file: file_name.to_string(), content: doc.visible_text() })
}

/// Dumps every page of a folder.
#[derive(Debug, Clone, Default)]
pub struct PageDumpExtractor {
    config: PageDumpConfig,
}

impl PageDumpExtractor {
    pub fn new(config: PageDumpConfig) -> Self {
        Self { config }
    }

    /// Extracts one record per matching file in `dir`, in listing order.
    ///
    /// # Errors
    ///
    /// Unlike the structured extractor, a missing folder is an error here:
    /// returns [`BlogmergeError::FileNotFound`](crate::BlogmergeError::FileNotFound).
    pub fn extract(&self, dir: &Path) -> Result<Extraction<PageRecord>> {
        let mut extraction = Extraction::new();

        for path in list_documents(dir, &self.config.extension)? {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    extraction.report(Diagnostic::FileFailed { file: dir.display().to_string(), reason: e.to_string() });
                    continue;
                }
            };
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            match read_source(&path).and_then(|html| extract_page(&html, &file_name)) {
                Ok(record) => extraction.push(record),
                Err(e) => extraction.report(Diagnostic::FileFailed { file: file_name, reason: e.to_string() }),
            }
        }

        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlogmergeError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_page_uses_first_h1() {
        let html = "<html><body><h1>First</h1><h1>Second</h1><p>Body text</p></body></html>";
        let record = extract_page(html, "page.html").unwrap();

        assert_eq!(record.title, "First");
        assert_eq!(record.file, "page.html");
        assert_eq!(record.content, "FirstSecondBody text");
    }

    #[test]
    fn test_extract_page_title_fallback() {
        let record = extract_page("<p>Only text</p>", "notes.html").unwrap();
        assert_eq!(record.title, "notes.html");
        assert_eq!(record.content, "Only text");
    }

    #[test]
    fn test_extract_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.html"), "<h1>A</h1>").unwrap();
        fs::write(tmp.path().join("b.md"), "# B").unwrap();

        let extraction = PageDumpExtractor::default().extract(tmp.path()).unwrap();
        assert_eq!(
            extraction.records,
            vec![PageRecord { title: "A".to_string(), file: "a.html".to_string(), content: "A".to_string() }]
        );
    }

    #[test]
    fn test_missing_dir_is_error() {
        let result = PageDumpExtractor::default().extract(Path::new("/nonexistent/pages"));
        assert!(matches!(result, Err(BlogmergeError::FileNotFound(_))));
    }
}

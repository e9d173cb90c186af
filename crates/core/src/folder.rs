//! Folder-of-exports extraction.
//!
//! Each `.html` file in the folder is one exported post. A post is kept only if it
//! has a content section and a footer carrying a permalink; anything else is
//! skipped with a diagnostic and the walk continues with the next file.

use std::path::Path;

use crate::diagnostics::{Diagnostic, Extraction};
use crate::io::{list_documents, read_source};
use crate::normalize::TextNormalizer;
use crate::parse::Document;
use crate::query::{LinkRef, find_prefixed_href};
use crate::record::PostRecord;
use crate::{BlogmergeError, Result};

/// Default permalink prefix for exported posts.
pub const DEFAULT_LINK_PREFIX: &str = "https://medium.com/p/";

const CONTENT_SELECTOR: &str = "div.section-content";
const TITLE_SELECTOR: &str = "h3.graf--title";
const PARAGRAPH_SELECTOR: &str = "p.graf--p";
const FOOTER_SELECTOR: &str = "footer";
const ANCHOR_SELECTOR: &str = "a[href]";

/// Configuration for folder extraction.
#[derive(Debug, Clone)]
pub struct FolderConfig {
    /// Footer anchors must start with this prefix to count as the permalink.
    pub permalink_prefix: String,
    /// File extension of exported posts, without the dot (default: `html`).
    pub extension: String,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self { permalink_prefix: DEFAULT_LINK_PREFIX.to_string(), extension: "html".to_string() }
    }
}

/// Extracts one exported post.
///
/// `file_name` is the title fallback and is used in diagnostics. Title and content
/// are returned as found; normalization happens in the caller.
///
/// # Errors
///
/// Returns the diagnostic explaining why the document was skipped.
pub fn extract_document(
    html: &str, file_name: &str, permalink_prefix: &str,
) -> std::result::Result<PostRecord, Diagnostic> {
    query_document(html, file_name, permalink_prefix)
        .unwrap_or_else(|e| Err(Diagnostic::FileFailed { file: file_name.to_string(), reason: e.to_string() }))
}

fn query_document(
    html: &str, file_name: &str, permalink_prefix: &str,
) -> Result<std::result::Result<PostRecord, Diagnostic>> {
    let file = file_name.to_string();
    let doc = Document::parse(html)?;

    let Some(section) = doc.select_first(CONTENT_SELECTOR)? else {
        return Ok(Err(Diagnostic::MissingContentRegion { file }));
    };

    let title = match section.select_first(TITLE_SELECTOR)? {
        Some(heading) => heading.visible_text(),
        None => file_name.to_string(),
    };

    let content = section
        .select(PARAGRAPH_SELECTOR)?
        .iter()
        .map(|p| p.visible_text())
        .collect::<Vec<_>>()
        .join(" ");

    let Some(footer) = doc.select_first(FOOTER_SELECTOR)? else {
        return Ok(Err(Diagnostic::MissingFooter { file }));
    };

    let anchors: Vec<LinkRef> = footer
        .select(ANCHOR_SELECTOR)?
        .iter()
        .map(|a| LinkRef::new(a.attr("href"), a.attr("rel")))
        .collect();

    match find_prefixed_href(&anchors, permalink_prefix) {
        Some(link) => Ok(Ok(PostRecord::new(title, content, link))),
        None => Ok(Err(Diagnostic::MissingPermalink { file })),
    }
}

/// Extracts post records from a folder of exported HTML posts.
pub struct DocumentExtractor<'a> {
    config: FolderConfig,
    normalizer: &'a TextNormalizer,
}

impl<'a> DocumentExtractor<'a> {
    pub fn new(config: FolderConfig, normalizer: &'a TextNormalizer) -> Self {
        Self { config, normalizer }
    }

    /// Extracts records from every matching file in `dir`, in listing order.
    ///
    /// A missing folder yields an empty extraction with a single warning.
    pub fn extract(&self, dir: &Path) -> Extraction<PostRecord> {
        let paths = match list_documents(dir, &self.config.extension) {
            Ok(paths) => paths,
            Err(BlogmergeError::FileNotFound(path)) => {
                return Extraction::failed(Diagnostic::DirectoryNotFound { path });
            }
            Err(e) => {
                return Extraction::failed(Diagnostic::FileFailed {
                    file: dir.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let mut extraction = Extraction::new();
        for path in &paths {
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

            match self.extract_file(path, &file_name) {
                Ok(record) => extraction.push(record),
                Err(diagnostic) => extraction.report(diagnostic),
            }
        }

        tracing::debug!(files = paths.len(), kept = extraction.len(), "folder extraction finished");
        extraction
    }

    fn extract_file(&self, path: &Path, file_name: &str) -> std::result::Result<PostRecord, Diagnostic> {
        let html = read_source(path)
            .map_err(|e| Diagnostic::FileFailed { file: file_name.to_string(), reason: e.to_string() })?;
        let record = extract_document(&html, file_name, &self.config.permalink_prefix)?;

        Ok(PostRecord {
            title: self.normalizer.normalize(&record.title),
            content: self.normalizer.normalize(&record.content),
            link: record.link,
        })
    }
}

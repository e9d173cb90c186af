//! Atom export extraction.
//!
//! Walks every `atom:entry` of a Blogger-style export in document order, keeps the
//! entries whose `rel="alternate"` permalink lives under the configured prefix, and
//! turns them into normalized [`PostRecord`]s.
//!
//! Parsing and XPath evaluation only lower each entry into a plain [`FeedEntry`];
//! permalink selection and record building are pure functions over that value.

use std::path::Path;

use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

use crate::anomaly::check_title;
use crate::diagnostics::{Diagnostic, Extraction};
use crate::io::read_source;
use crate::normalize::TextNormalizer;
use crate::query::{LinkRef, find_feed_permalink};
use crate::record::PostRecord;
use crate::{BlogmergeError, Result};

/// Atom namespace URI.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Default permalink prefix for feed entries.
pub const DEFAULT_FEED_PREFIX: &str = "https://newcantoniahistory.blogspot.com";

/// Configuration for feed extraction.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Entries are kept only if an alternate link starts with this prefix.
    pub permalink_prefix: String,
    /// Report titles that carry no year (default: true).
    pub check_title_year: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { permalink_prefix: DEFAULT_FEED_PREFIX.to_string(), check_title_year: true }
    }
}

/// One entry of the export, detached from the XML tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedEntry {
    pub links: Vec<LinkRef>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Result of turning one entry into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub record: PostRecord,
    pub diagnostic: Option<Diagnostic>,
}

/// Compiled XPath queries over the Atom namespace.
struct AtomQueries {
    entries: XPath,
    links: XPath,
    title: XPath,
    content: XPath,
}

impl AtomQueries {
    fn compile() -> Result<Self> {
        let factory = Factory::new();
        let build = |expr: &str| -> Result<XPath> {
            factory
                .build(expr)
                .map_err(|e| BlogmergeError::XPathError(format!("Invalid XPath '{}': {}", expr, e)))?
                .ok_or_else(|| BlogmergeError::XPathError(format!("Invalid XPath: {}", expr)))
        };

        Ok(Self {
            entries: build("//atom:entry")?,
            links: build("atom:link")?,
            title: build("atom:title")?,
            content: build("atom:content")?,
        })
    }
}

fn nodes<'d>(xpath: &XPath, context: &Context<'d>, node: Node<'d>) -> Result<Vec<Node<'d>>> {
    match xpath.evaluate(context, node)? {
        Value::Nodeset(nodeset) => Ok(nodeset.document_order()),
        _ => Ok(Vec::new()),
    }
}

fn first_text<'d>(xpath: &XPath, context: &Context<'d>, node: Node<'d>) -> Result<Option<String>> {
    Ok(nodes(xpath, context, node)?.first().map(|n| n.string_value()))
}

/// Parses an Atom document and lowers every entry, in document order.
///
/// # Errors
///
/// Returns [`BlogmergeError::XmlParseError`] if the document is not well-formed.
pub fn parse_entries(xml: &str) -> Result<Vec<FeedEntry>> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let queries = AtomQueries::compile()?;
    let package = parser::parse(xml).map_err(|e| BlogmergeError::XmlParseError(format!("{}", e)))?;
    let document = package.as_document();

    let mut context = Context::new();
    context.set_namespace("atom", ATOM_NS);

    let mut entries = Vec::new();
    for entry in nodes(&queries.entries, &context, document.root().into())? {
        let links = nodes(&queries.links, &context, entry)?
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => {
                    Some(LinkRef::new(element.attribute_value("href"), element.attribute_value("rel")))
                }
                _ => None,
            })
            .collect();

        entries.push(FeedEntry {
            links,
            title: first_text(&queries.title, &context, entry)?,
            content: first_text(&queries.content, &context, entry)?,
        });
    }

    Ok(entries)
}

/// Builds the record for one entry, or `None` if it has no in-scope permalink.
pub fn build_record(entry: &FeedEntry, config: &FeedConfig, normalizer: &TextNormalizer) -> Option<EntryOutcome> {
    let link = find_feed_permalink(&entry.links, &config.permalink_prefix)?;
    let title = entry.title.as_deref().unwrap_or_default();
    let content = entry.content.as_deref().unwrap_or_default();

    let diagnostic = if config.check_title_year { check_title(title, link) } else { None };

    Some(EntryOutcome {
        record: PostRecord::new(normalizer.normalize(title), normalizer.normalize(content), link),
        diagnostic,
    })
}

/// Extracts post records from an Atom export.
///
/// # Example
///
/// ```rust
/// use blogmerge_core::{FeedConfig, FeedExtractor, TextNormalizer};
///
/// let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
///   <entry>
///     <link rel="alternate" href="https://newcantoniahistory.blogspot.com/2020/01/a.html"/>
///     <title>Canton 1920</title>
///     <content>Body</content>
///   </entry>
/// </feed>"#;
///
/// let normalizer = TextNormalizer::default();
/// let extractor = FeedExtractor::new(FeedConfig::default(), &normalizer);
/// let extraction = extractor.extract_str(xml).unwrap();
/// assert_eq!(extraction.records.len(), 1);
/// ```
pub struct FeedExtractor<'a> {
    config: FeedConfig,
    normalizer: &'a TextNormalizer,
}

impl<'a> FeedExtractor<'a> {
    pub fn new(config: FeedConfig, normalizer: &'a TextNormalizer) -> Self {
        Self { config, normalizer }
    }

    /// Extracts records from the export at `path`.
    ///
    /// A missing or unparseable export yields an empty extraction with one
    /// diagnostic; it never fails the caller.
    pub fn extract(&self, path: &Path) -> Extraction<PostRecord> {
        let xml = match read_source(path) {
            Ok(xml) => xml,
            Err(BlogmergeError::FileNotFound(path)) => return Extraction::failed(Diagnostic::FeedNotFound { path }),
            Err(e) => {
                return Extraction::failed(Diagnostic::FeedParseFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        match self.extract_str(&xml) {
            Ok(extraction) => extraction,
            Err(e) => Extraction::failed(Diagnostic::FeedParseFailed { path: path.to_path_buf(), reason: e.to_string() }),
        }
    }

    /// Extracts records from an in-memory export.
    pub fn extract_str(&self, xml: &str) -> Result<Extraction<PostRecord>> {
        let entries = parse_entries(xml)?;
        let mut extraction = Extraction::new();

        for entry in &entries {
            let Some(outcome) = build_record(entry, &self.config, self.normalizer) else {
                tracing::trace!(title = ?entry.title, "skipping entry without matching permalink");
                continue;
            };
            if let Some(diagnostic) = outcome.diagnostic {
                extraction.report(diagnostic);
            }
            extraction.push(outcome.record);
        }

        tracing::debug!(entries = entries.len(), kept = extraction.len(), "feed extraction finished");
        Ok(extraction)
    }
}

//! The aggregation pipeline.
//!
//! [`Aggregator`] runs the feed source, then the folder source, concatenates their
//! records in that order, renders them as a literal assignment, and writes the file
//! atomically.
//!
//! # Example
//!
//! ```rust,no_run
//! use blogmerge_core::{Aggregator, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .feed_path("blogger_export.xml")
//!     .posts_dir("posts")
//!     .output_path("blogger_export.js")
//!     .build();
//!
//! let summary = Aggregator::new(config)?.run()?;
//! println!("{} posts written", summary.total);
//! # Ok::<(), blogmerge_core::BlogmergeError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Extraction};
use crate::feed::{DEFAULT_FEED_PREFIX, FeedConfig, FeedExtractor};
use crate::folder::{DEFAULT_LINK_PREFIX, DocumentExtractor, FolderConfig};
use crate::formatters::{DEFAULT_VARIABLE, EscapeMode, JsConfig, JsFormatter};
use crate::io::write_atomic;
use crate::normalize::{ScriptTarget, TextNormalizer};
use crate::pages::{PageDumpConfig, PageDumpExtractor};
use crate::record::{PageRecord, PostRecord};
use crate::{BlogmergeError, Result};

/// Configuration for a full export run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Atom export path (default: `blogger_export.xml`).
    pub feed_path: PathBuf,

    /// Folder of exported HTML posts (default: `posts`).
    pub posts_dir: PathBuf,

    /// Output file (default: `blogger_export.js`).
    pub output_path: PathBuf,

    /// Identifier assigned in the output (default: `postsData`).
    pub variable: String,

    /// Permalink prefix for feed entries.
    pub feed_prefix: String,

    /// Permalink prefix for folder posts.
    pub link_prefix: String,

    /// Extension of folder posts, without the dot (default: `html`).
    pub extension: String,

    /// Target script for titles and content (default: traditional).
    pub script: ScriptTarget,

    /// Whether the feed source is read at all (default: true).
    pub include_feed: bool,

    /// Whether to report feed titles without a year (default: true).
    pub check_title_year: bool,

    /// Non-ASCII handling in the output (default: preserve).
    pub escape: EscapeMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from("blogger_export.xml"),
            posts_dir: PathBuf::from("posts"),
            output_path: PathBuf::from("blogger_export.js"),
            variable: DEFAULT_VARIABLE.to_string(),
            feed_prefix: DEFAULT_FEED_PREFIX.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            extension: "html".to_string(),
            script: ScriptTarget::default(),
            include_feed: true,
            check_title_year: true,
            escape: EscapeMode::default(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Checks values that would otherwise produce an unusable output file.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.variable)?;
        if self.feed_prefix.is_empty() || self.link_prefix.is_empty() {
            return Err(BlogmergeError::ConfigError("permalink prefixes must not be empty".to_string()));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(BlogmergeError::ConfigError(format!(
                "invalid document extension '{}' (expected e.g. 'html')",
                self.extension
            )));
        }
        Ok(())
    }

    fn feed_config(&self) -> FeedConfig {
        FeedConfig { permalink_prefix: self.feed_prefix.clone(), check_title_year: self.check_title_year }
    }

    fn folder_config(&self) -> FolderConfig {
        FolderConfig { permalink_prefix: self.link_prefix.clone(), extension: self.extension.clone() }
    }

    fn js_config(&self) -> JsConfig {
        JsConfig { variable: self.variable.clone(), escape: self.escape }
    }
}

/// Returns an error unless `name` is a plain JavaScript identifier.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(BlogmergeError::ConfigError(format!("'{}' is not a valid identifier", name)))
    }
}

/// Builder for PipelineConfig.
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: PipelineConfig::default() }
    }

    pub fn feed_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.feed_path = value.into();
        self
    }

    pub fn posts_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.posts_dir = value.into();
        self
    }

    pub fn output_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output_path = value.into();
        self
    }

    pub fn variable(mut self, value: impl Into<String>) -> Self {
        self.config.variable = value.into();
        self
    }

    pub fn feed_prefix(mut self, value: impl Into<String>) -> Self {
        self.config.feed_prefix = value.into();
        self
    }

    pub fn link_prefix(mut self, value: impl Into<String>) -> Self {
        self.config.link_prefix = value.into();
        self
    }

    pub fn extension(mut self, value: impl Into<String>) -> Self {
        self.config.extension = value.into();
        self
    }

    pub fn script(mut self, value: ScriptTarget) -> Self {
        self.config.script = value;
        self
    }

    pub fn include_feed(mut self, value: bool) -> Self {
        self.config.include_feed = value;
        self
    }

    pub fn check_title_year(mut self, value: bool) -> Self {
        self.config.check_title_year = value;
        self
    }

    pub fn escape(mut self, value: EscapeMode) -> Self {
        self.config.escape = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Both sources' extractions, feed first.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub feed: Extraction<PostRecord>,
    pub folder: Extraction<PostRecord>,
}

impl Dataset {
    /// Feed records in document order, then folder records in listing order.
    pub fn records(&self) -> Vec<PostRecord> {
        self.feed.records.iter().chain(&self.folder.records).cloned().collect()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.feed.diagnostics.iter().chain(&self.folder.diagnostics)
    }

    pub fn total(&self) -> usize {
        self.feed.len() + self.folder.len()
    }
}

/// Counts reported back to the caller after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub feed_count: usize,
    pub folder_count: usize,
    pub total: usize,
    pub output: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs both extractors and writes the merged dataset.
#[derive(Debug)]
pub struct Aggregator {
    config: PipelineConfig,
    normalizer: TextNormalizer,
}

impl Aggregator {
    /// Creates an aggregator with a normalizer for the configured script.
    ///
    /// # Errors
    ///
    /// Returns [`BlogmergeError::ConfigError`] if the config is invalid.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let normalizer = TextNormalizer::new(config.script);
        Self::with_normalizer(config, normalizer)
    }

    /// Creates an aggregator around an existing normalizer.
    pub fn with_normalizer(config: PipelineConfig, normalizer: TextNormalizer) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the feed source (unless disabled), then the folder source.
    pub fn collect(&self) -> Dataset {
        let feed = if self.config.include_feed {
            FeedExtractor::new(self.config.feed_config(), &self.normalizer).extract(&self.config.feed_path)
        } else {
            tracing::info!("feed source disabled, skipping {}", self.config.feed_path.display());
            Extraction::new()
        };

        let folder =
            DocumentExtractor::new(self.config.folder_config(), &self.normalizer).extract(&self.config.posts_dir);

        Dataset { feed, folder }
    }

    /// Renders the merged records as a literal assignment.
    pub fn render(&self, dataset: &Dataset) -> Result<String> {
        JsFormatter::new(self.config.js_config()).render(&dataset.records())
    }

    /// Collects, renders, and writes the dataset.
    ///
    /// # Errors
    ///
    /// Fails only if rendering or writing fails; the output file is then untouched.
    pub fn run(&self) -> Result<Summary> {
        let dataset = self.collect();
        let rendered = self.render(&dataset)?;
        write_atomic(&self.config.output_path, rendered.as_bytes())?;

        let summary = Summary {
            feed_count: dataset.feed.len(),
            folder_count: dataset.folder.len(),
            total: dataset.total(),
            output: self.config.output_path.clone(),
            diagnostics: dataset.diagnostics().cloned().collect(),
        };

        tracing::info!(
            feed = summary.feed_count,
            folder = summary.folder_count,
            total = summary.total,
            output = %summary.output.display(),
            "dataset written"
        );
        Ok(summary)
    }
}

/// Dumps every page under `dir` into `output` using the whole-page extractor.
///
/// Non-ASCII output follows `js.escape`.
pub fn dump_pages(dir: &Path, output: &Path, js: &JsConfig) -> Result<Extraction<PageRecord>> {
    validate_identifier(&js.variable)?;

    let extraction = PageDumpExtractor::new(PageDumpConfig::default()).extract(dir)?;
    let rendered = JsFormatter::new(js.clone()).render(&extraction.records)?;
    write_atomic(output, rendered.as_bytes())?;

    tracing::info!(pages = extraction.len(), output = %output.display(), "page dump written");
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::from_js_literal;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    const FEED: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
            <link rel="alternate" href="https://newcantoniahistory.blogspot.com/2020/01/one.html"/>
            <title>One 1920</title><content>first</content>
        </entry>
    </feed>"#;

    const POST: &str = r#"<div class="section-content"><h3 class="graf--title">Two 1930</h3>
        <p class="graf--p">second</p></div><footer><a href="https://medium.com/p/two">x</a></footer>"#;

    fn workspace() -> (TempDir, PipelineConfig) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("feed.xml"), FEED).unwrap();
        fs::create_dir(tmp.path().join("posts")).unwrap();
        fs::write(tmp.path().join("posts").join("two.html"), POST).unwrap();

        let config = PipelineConfig::builder()
            .feed_path(tmp.path().join("feed.xml"))
            .posts_dir(tmp.path().join("posts"))
            .output_path(tmp.path().join("out.js"))
            .script(ScriptTarget::Unchanged)
            .build();
        (tmp, config)
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.variable, "postsData");
        assert_eq!(config.output_path, PathBuf::from("blogger_export.js"));
        assert!(config.include_feed);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("postsData", true)]
    #[case("_posts$2", true)]
    #[case("2posts", false)]
    #[case("posts-data", false)]
    #[case("", false)]
    fn test_validate_identifier(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(validate_identifier(name).is_ok(), valid);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig::builder().link_prefix("").build();
        assert!(matches!(Aggregator::new(config), Err(BlogmergeError::ConfigError(_))));

        let config = PipelineConfig::builder().extension(".html").build();
        assert!(matches!(Aggregator::new(config), Err(BlogmergeError::ConfigError(_))));
    }

    #[test]
    fn test_run_feed_then_folder() {
        let (_tmp, config) = workspace();
        let output = config.output_path.clone();
        let summary = Aggregator::new(config).unwrap().run().unwrap();

        assert_eq!((summary.feed_count, summary.folder_count, summary.total), (1, 1, 2));
        assert!(summary.diagnostics.is_empty());

        let written = fs::read_to_string(output).unwrap();
        let records: Vec<PostRecord> = from_js_literal(&written, "postsData").unwrap();
        assert_eq!(
            records,
            vec![
                PostRecord::new("One 1920", "first", "https://newcantoniahistory.blogspot.com/2020/01/one.html"),
                PostRecord::new("Two 1930", "second", "https://medium.com/p/two"),
            ]
        );
    }

    #[test]
    fn test_feed_can_be_disabled() {
        let (_tmp, config) = workspace();
        let config = PipelineConfig { include_feed: false, ..config };
        let dataset = Aggregator::new(config).unwrap().collect();

        assert!(dataset.feed.is_empty());
        assert_eq!(dataset.total(), 1);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let (tmp, config) = workspace();
        let config = PipelineConfig { output_path: tmp.path().join("missing").join("out.js"), ..config };

        let result = Aggregator::new(config).unwrap().run();
        assert!(matches!(result, Err(BlogmergeError::IoError(_))));
    }

    #[test]
    fn test_dump_pages() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("p.html"), "<h1>標題</h1><p>正文</p>").unwrap();
        let output = tmp.path().join("posts_data.js");
        let js = JsConfig { escape: EscapeMode::Ascii, ..Default::default() };

        let extraction = dump_pages(tmp.path(), &output, &js).unwrap();
        assert_eq!(extraction.len(), 1);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.is_ascii());
        let pages: Vec<PageRecord> = from_js_literal(&written, "postsData").unwrap();
        assert_eq!(pages[0].title, "標題");
        assert_eq!(pages[0].content, "標題正文");
    }
}

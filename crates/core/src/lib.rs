pub mod anomaly;
pub mod diagnostics;
pub mod error;
pub mod feed;
pub mod folder;
pub mod formatters;
pub mod io;
pub mod normalize;
pub mod pages;
pub mod parse;
pub mod pipeline;
pub mod query;
pub mod record;

pub use anomaly::{check_title, has_year};
pub use diagnostics::{Diagnostic, Extraction, Severity};
pub use error::{BlogmergeError, Result};
#[doc(hidden)]
pub use feed::{EntryOutcome, FeedEntry, build_record, parse_entries};
pub use feed::{FeedConfig, FeedExtractor};
pub use folder::{DocumentExtractor, FolderConfig, extract_document};
pub use formatters::{EscapeMode, JsConfig, JsFormatter, from_js_literal, to_js_literal};
pub use io::{read_source, write_atomic};
pub use normalize::{ScriptTarget, TextNormalizer};
pub use pages::{PageDumpConfig, PageDumpExtractor, extract_page};
pub use parse::Document;
pub use pipeline::{Aggregator, Dataset, PipelineConfig, PipelineConfigBuilder, Summary, dump_pages};
#[doc(hidden)]
pub use query::{LinkRef, find_feed_permalink, find_prefixed_href};
pub use record::{PageRecord, PostRecord};

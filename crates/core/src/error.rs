//! Error types for blogmerge operations.
//!
//! This module defines the main error type [`BlogmergeError`]. Only conditions that
//! abort a whole source or the whole run are errors; per-entry and per-file problems
//! are reported as [`Diagnostic`](crate::Diagnostic)s instead.
//!
//! # Example
//!
//! ```rust
//! use blogmerge_core::{BlogmergeError, Result};
//!
//! fn variable_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(BlogmergeError::ConfigError("variable name is empty".to_string()));
//!     }
//!     Ok(name)
//! }
//!
//! assert!(variable_name("").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

use sxd_xpath::ExecutionError;

/// Main error type for extraction, serialization, and output.
#[derive(Error, Debug)]
pub enum BlogmergeError {
    /// File or directory not found.
    ///
    /// Returned when a source path does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// XML parsing errors.
    ///
    /// Returned when the feed export is not well-formed XML.
    #[error("Failed to parse XML: {0}")]
    XmlParseError(String),

    /// XPath compilation or evaluation errors.
    #[error("XPath error: {0}")]
    XPathError(String),

    /// HTML query errors.
    ///
    /// Returned for invalid CSS selectors. HTML itself is parsed leniently.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// JSON serialization errors.
    #[error("Failed to serialize dataset: {0}")]
    SerializeError(String),

    /// File read and write errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<ExecutionError> for BlogmergeError {
    fn from(err: ExecutionError) -> Self {
        BlogmergeError::XPathError(err.to_string())
    }
}

impl From<serde_json::Error> for BlogmergeError {
    fn from(err: serde_json::Error) -> Self {
        BlogmergeError::SerializeError(err.to_string())
    }
}

/// Result type alias for BlogmergeError.
pub type Result<T> = std::result::Result<T, BlogmergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlogmergeError::ConfigError("bad variable".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("bad variable"));
    }

    #[test]
    fn test_file_not_found_error() {
        let err = BlogmergeError::FileNotFound(PathBuf::from("blogger_export.xml"));
        assert!(err.to_string().contains("blogger_export.xml"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: BlogmergeError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, BlogmergeError::SerializeError(_)));
    }
}

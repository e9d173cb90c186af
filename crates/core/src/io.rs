//! Reading sources and writing the dataset file.
//!
//! Output goes through [`write_atomic`], which either replaces the destination
//! completely or leaves it untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{BlogmergeError, Result};

/// Reads a UTF-8 source file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        Err(BlogmergeError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(BlogmergeError::from)
    }
}

/// Lists files in `dir` whose extension equals `extension`, in directory-listing order.
///
/// The order is whatever the filesystem returns and is not sorted. An entry that
/// cannot be read is returned as an `Err` in its place so callers can skip it.
pub fn list_documents(dir: &Path, extension: &str) -> Result<Vec<Result<PathBuf>>> {
    if !dir.is_dir() {
        return Err(BlogmergeError::FileNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(select_documents(entries, extension))
}

fn select_documents(entries: impl IntoIterator<Item = io::Result<PathBuf>>, extension: &str) -> Vec<Result<PathBuf>> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) => {
                Some(Ok(path))
            }
            Ok(_) => None,
            Err(e) => Some(Err(BlogmergeError::from(e))),
        })
        .collect()
}

/// Writes `contents` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over the destination only after every byte is
/// written and flushed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| BlogmergeError::IoError(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_source_not_found() {
        let result = read_source(Path::new("/nonexistent/path/blogger_export.xml"));
        assert!(matches!(result, Err(BlogmergeError::FileNotFound(_))));
    }

    #[test]
    fn test_list_documents_filters_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.html"), "<p>a</p>").unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("c.html.bak"), "c").unwrap();
        fs::create_dir(tmp.path().join("nested.html")).unwrap();

        let paths: Vec<PathBuf> = list_documents(tmp.path(), "html").unwrap().into_iter().map(|p| p.unwrap()).collect();
        assert_eq!(paths, vec![tmp.path().join("a.html")]);
    }

    #[test]
    fn test_unreadable_entry_does_not_stop_listing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.html"), "<p>a</p>").unwrap();
        fs::write(tmp.path().join("b.html"), "<p>b</p>").unwrap();

        let entries = vec![
            Ok(tmp.path().join("a.html")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "entry unreadable")),
            Ok(tmp.path().join("b.html")),
        ];
        let listed = select_documents(entries, "html");

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].as_ref().unwrap(), &tmp.path().join("a.html"));
        assert!(matches!(listed[1], Err(BlogmergeError::IoError(_))));
        assert_eq!(listed[2].as_ref().unwrap(), &tmp.path().join("b.html"));
    }

    #[test]
    fn test_list_documents_missing_dir() {
        let result = list_documents(Path::new("/nonexistent/posts"), "html");
        assert!(matches!(result, Err(BlogmergeError::FileNotFound(_))));
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.js");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "const postsData = [];".as_bytes()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "const postsData = [];");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_leaves_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("out.js");

        let result = write_atomic(&path, b"[]");

        assert!(matches!(result, Err(BlogmergeError::IoError(_))));
        assert!(!path.exists());
    }
}

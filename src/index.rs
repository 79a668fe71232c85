//! Discovery of markdown files under a root directory.

use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::warn;

/// Error raised when the document root cannot be scanned.
///
/// Scanning happens once at startup, so any variant of this error is fatal to
/// the caller: there is no index to serve without a completed scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root does not exist or could not be opened.
    #[error("cannot scan {}: {source}", path.display())]
    Root {
        /// The root that was requested.
        path: PathBuf,
        /// The underlying filesystem error.
        source: io::Error,
    },

    /// The root exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Traversal failed partway through the tree.
    #[error("markdown scan failed: {0}")]
    Walk(#[from] ignore::Error),
}

/// A single discovered markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    path: PathBuf,
    name: String,
}

impl IndexEntry {
    /// The absolute path of the document on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The display name: the path relative to the scan root, `/`-separated
    /// regardless of platform. This is also the URL path (minus the leading
    /// slash) the document is served under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An immutable listing of every markdown file under a root directory.
///
/// The index is built once, before the server starts accepting traffic, and
/// is never mutated afterwards. Files that disappear after the scan surface
/// as read errors at request time rather than being evicted.
#[derive(Debug)]
pub struct FileIndex {
    root: PathBuf,
    entries: Vec<IndexEntry>,
}

impl FileIndex {
    /// Recursively scans `root` for files whose name ends in `.md`.
    ///
    /// The suffix check is case-sensitive: `NOTES.MD` is not indexed. Entries
    /// are sorted by path, so scanning an unchanged tree twice yields the
    /// same index. Files with non-UTF-8 names cannot be addressed by URL and
    /// are skipped with a warning.
    pub fn scan(root: impl AsRef<Path>) -> Result<FileIndex, ScanError> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| ScanError::Root {
            path: root.to_owned(),
            source,
        })?;

        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let mut entries = vec![];

        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .sort_by_file_path(Ord::cmp)
            .build();

        for result in walker {
            let entry = result?;

            if !entry.file_type().map_or(false, |ty| ty.is_file()) {
                continue;
            }

            if !entry.file_name().to_string_lossy().ends_with(".md") {
                continue;
            }

            let path = entry.into_path();

            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };

            match url_name(relative) {
                Some(name) => entries.push(IndexEntry { path, name }),
                None => warn!("skipping non-UTF-8 file name: {}", path.display()),
            }
        }

        Ok(FileIndex { root, entries })
    }

    /// The canonicalized root the index was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The indexed documents, in scan order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// The number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scan found any documents at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maps a request identifier back to an indexed document.
    ///
    /// The leading `/` is stripped and the first entry whose display name
    /// ends with the remainder wins. Requesting an entry's full display name
    /// therefore always round-trips, while a bare file name like `guide.md`
    /// still finds `docs/guide.md`. Duplicate matches resolve to the first in
    /// index order.
    pub fn resolve(&self, identifier: &str) -> Option<&IndexEntry> {
        let identifier = identifier.strip_prefix('/').unwrap_or(identifier);

        if identifier.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.name.ends_with(identifier))
    }
}

/// Joins the components of a relative path with `/`, failing on non-UTF-8.
fn url_name(relative: &Path) -> Option<String> {
    let mut name = String::new();

    for component in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(component.as_os_str().to_str()?);
    }

    Some(name)
}

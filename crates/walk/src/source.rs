use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entry::EntryKind;

/// A single child reported by an [`EntrySource`].
#[derive(Clone, Debug)]
pub struct SourceEntry {
    /// Name of the child within its parent directory.
    pub name: OsString,
    /// Classification of the child.
    pub kind: EntryKind,
}

/// Capability to list the immediate children of a directory.
///
/// Implementations resolve `relative_dir` against whatever root they were
/// configured with; an empty path identifies the root itself. The walker
/// sorts the returned entries, so implementations are free to yield them in
/// whatever order the backing store provides.
pub trait EntrySource {
    /// Lists the immediate children of `relative_dir`.
    fn list_dir(&mut self, relative_dir: &Path) -> io::Result<Vec<SourceEntry>>;
}

/// [`EntrySource`] backed by the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns the configured root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EntrySource for LocalSource {
    fn list_dir(&mut self, relative_dir: &Path) -> io::Result<Vec<SourceEntry>> {
        let dir = self.root.join(relative_dir);
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else if metadata.is_file() {
                EntryKind::File {
                    size: metadata.len(),
                }
            } else {
                // Symlinks and special files have no mirror-side
                // representation; they are skipped rather than failing the run.
                debug!(path = %entry.path().display(), "skipping special entry");
                continue;
            };
            entries.push(SourceEntry {
                name: entry.file_name(),
                kind,
            });
        }
        Ok(entries)
    }
}

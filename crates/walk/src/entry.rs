use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Classification of a traversed entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory that may contain further entries.
    Directory,
    /// A regular file together with its size in bytes.
    File {
        /// Size of the file in bytes as reported by the source.
        size: u64,
    },
}

impl EntryKind {
    /// Returns `true` when the entry is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns the file size, or `None` for directories.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        match self {
            Self::Directory => None,
            Self::File { size } => Some(*size),
        }
    }
}

/// Result of a traversal step.
#[derive(Clone, Debug)]
pub struct TreeEntry {
    pub(crate) relative_path: PathBuf,
    pub(crate) kind: EntryKind,
    pub(crate) depth: usize,
}

impl TreeEntry {
    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Consumes the entry and returns its relative path.
    #[must_use]
    pub fn into_relative_path(self) -> PathBuf {
        self.relative_path
    }

    /// Returns the entry classification.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the final component of the relative path.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.relative_path.file_name()
    }

    /// Reports the depth of the entry relative to the root (direct children
    /// of the root have depth `1`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

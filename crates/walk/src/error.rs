use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error returned when traversal fails.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn root_listing(source: io::Error) -> Self {
        Self::new(WalkErrorKind::RootListing { source })
    }

    pub(crate) fn directory_listing(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::DirectoryListing { path, source })
    }

    /// Returns the specific failure that terminated traversal.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the relative path associated with the error.
    ///
    /// Failures while listing the traversal root report an empty path since
    /// the root has no name of its own within the traversal.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::RootListing { source } => {
                write!(f, "failed to list traversal root: {source}")
            }
            WalkErrorKind::DirectoryListing { path, source } => {
                write!(
                    f,
                    "failed to list directory '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            WalkErrorKind::RootListing { source }
            | WalkErrorKind::DirectoryListing { source, .. } => Some(source),
        }
    }
}

/// Classification of traversal failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// Failed to list the contents of the traversal root.
    RootListing {
        /// Underlying error reported by the entry source.
        source: io::Error,
    },
    /// Failed to list the contents of a subdirectory.
    DirectoryListing {
        /// Relative path of the directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error reported by the entry source.
        source: io::Error,
    },
}

impl WalkErrorKind {
    /// Returns the relative path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::RootListing { .. } => Path::new(""),
            Self::DirectoryListing { path, .. } => path,
        }
    }
}

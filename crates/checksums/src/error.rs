use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures encountered while computing a payload digest.
#[derive(Debug, Error)]
pub enum DigestError {
    /// Reading the payload (or one of its files) failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Enumerating the directory payload failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),
}

impl DigestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

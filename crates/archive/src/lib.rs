#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `archive` packs the local staging directory into a single
//! gzip-compressed tar file so the payload can be verified and pushed as one
//! unit. Entries are appended in the deterministic sorted order produced by
//! [`walk::Walker`], preserving every relative path, so expanding the archive
//! reproduces the staging tree path-for-path and byte-for-byte.
//!
//! The archive is content-equivalent, not byte-identical: compressed size and
//! gzip framing may differ between runs, but the contained file set never
//! does.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;
use tracing::{debug, info};

use walk::{LocalSource, Walker};

/// Suffix appended to the staging path to name the archive artifact.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Returns the archive path derived from a staging directory path.
#[must_use]
pub fn archive_path_for(staging: &Path) -> PathBuf {
    let mut name = OsString::from(staging.as_os_str());
    name.push(ARCHIVE_SUFFIX);
    PathBuf::from(name)
}

/// Failures encountered while packing the staging tree.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be created.
    #[error("failed to create archive '{}': {source}", path.display())]
    Create {
        /// Path of the archive being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An entry could not be appended to the archive.
    #[error("failed to archive '{}': {source}", path.display())]
    Append {
        /// Relative path of the entry that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Flushing the compressed stream failed.
    #[error("failed to finalize archive '{}': {source}", path.display())]
    Finish {
        /// Path of the archive being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Enumerating the staging tree failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),
}

/// Packs the entire `staging` tree into a gzip-compressed tar file at
/// `archive`.
///
/// Relative paths inside the archive match the staging tree exactly; the
/// staging directory itself is not represented as an entry.
pub fn pack(staging: &Path, archive: &Path) -> Result<(), ArchiveError> {
    info!(staging = %staging.display(), archive = %archive.display(), "packing staging tree");

    let file = File::create(archive).map_err(|source| ArchiveError::Create {
        path: archive.to_path_buf(),
        source,
    })?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut source = LocalSource::new(staging);
    let entries: Vec<_> = Walker::new(&mut source)?.collect::<Result<_, _>>()?;
    for entry in entries {
        let relative = entry.relative_path();
        let full = staging.join(relative);
        let result = if entry.kind().is_dir() {
            builder.append_dir(relative, &full)
        } else {
            builder.append_path_with_name(&full, relative)
        };
        result.map_err(|source| ArchiveError::Append {
            path: relative.to_path_buf(),
            source,
        })?;
        debug!(path = %relative.display(), "archived entry");
    }

    let encoder = builder
        .into_inner()
        .map_err(|source| ArchiveError::Finish {
            path: archive.to_path_buf(),
            source,
        })?;
    encoder.finish().map_err(|source| ArchiveError::Finish {
        path: archive.to_path_buf(),
        source,
    })?;
    Ok(())
}

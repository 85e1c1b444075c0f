//! The pipeline-level error taxonomy.
//!
//! Every stage failure is mapped into exactly one [`PipelineError`] variant
//! so the front-end can report which stage aborted the run. Propagation is
//! fail-fast: the first error ends the pipeline, nothing is retried, and no
//! completed stage is rolled back.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use archive::ArchiveError;
use checksums::DigestError;
use transfer::{FetchError, PushError};

/// Terminal failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The fetch stage failed while mirroring the source tree.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The archive stage failed while packing the staging tree.
    #[error("compression failed: {0}")]
    Compression(#[from] ArchiveError),

    /// The computed payload digest did not match the expected checksum.
    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        /// Checksum supplied by the operator.
        expected: String,
        /// Checksum computed over the payload.
        actual: String,
    },

    /// The push stage failed while uploading the payload.
    #[error("push failed: {0}")]
    Push(#[from] PushError),

    /// A local payload path vanished between stages.
    #[error("local path not found: '{}'", .0.display())]
    LocalPathNotFound(PathBuf),

    /// A failure outside the named stage taxonomy.
    #[error("unexpected failure: {source}")]
    Unclassified {
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PipelineError {
    /// Wraps an arbitrary error that fits no named stage.
    pub fn unclassified<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unclassified {
            source: Box::new(source),
        }
    }

    /// Short name of the failed stage, used in diagnostics.
    #[must_use]
    pub fn stage_name(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Compression(_) => "archive",
            Self::ChecksumMismatch { .. } => "verify",
            Self::Push(_) => "push",
            Self::LocalPathNotFound(_) | Self::Unclassified { .. } => "pipeline",
        }
    }
}

/// Maps a digest failure onto the pipeline taxonomy.
///
/// A vanished payload surfaces as [`PipelineError::LocalPathNotFound`];
/// every other read failure has no named stage and is unclassified.
pub(crate) fn classify_digest_error(error: DigestError) -> PipelineError {
    match &error {
        DigestError::Io { path, source } if source.kind() == io::ErrorKind::NotFound => {
            PipelineError::LocalPathNotFound(path.clone())
        }
        _ => PipelineError::unclassified(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_identify_the_failing_stage() {
        let mismatch = PipelineError::ChecksumMismatch {
            expected: "aa".to_owned(),
            actual: "bb".to_owned(),
        };
        assert_eq!(mismatch.stage_name(), "verify");

        let missing = PipelineError::LocalPathNotFound(PathBuf::from("gone"));
        assert_eq!(missing.stage_name(), "pipeline");
    }

    #[test]
    fn checksum_mismatch_message_names_both_digests() {
        let mismatch = PipelineError::ChecksumMismatch {
            expected: "aa".to_owned(),
            actual: "bb".to_owned(),
        };
        let message = mismatch.to_string();
        assert!(message.contains("aa"));
        assert!(message.contains("bb"));
    }

    #[test]
    fn missing_payload_digest_errors_become_local_path_not_found() {
        let digest_error = checksums::payload_digest(std::path::Path::new("./missing_payload"))
            .expect_err("path is missing");
        let mapped = classify_digest_error(digest_error);
        assert!(matches!(mapped, PipelineError::LocalPathNotFound(_)));
    }
}

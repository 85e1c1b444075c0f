//! The immutable configuration for one relay run.

use std::path::PathBuf;

use transfer::{DestEndpoint, SourceEndpoint};

/// Everything one pipeline run needs to know.
///
/// A job is assembled once by the front-end and never mutated after the
/// pipeline starts; the orchestrator borrows it for the whole run. `Debug`
/// output is safe to log because the endpoint types redact their passwords.
#[derive(Clone, Debug)]
pub struct TransferJob {
    /// SFTP endpoint the tree is pulled from.
    pub source: SourceEndpoint,
    /// FTP endpoint the payload is pushed to.
    pub destination: DestEndpoint,
    /// Local directory the source tree is mirrored into.
    pub staging: PathBuf,
    /// Whether to pack the mirror into a tar.gz archive before pushing.
    pub compress: bool,
    /// Expected SHA-256 of the payload; verification is skipped when absent.
    pub expected_checksum: Option<String>,
}

impl TransferJob {
    /// Returns `true` when the verify stage will run.
    #[must_use]
    pub const fn verifies(&self) -> bool {
        self.expected_checksum.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_job() -> TransferJob {
        TransferJob {
            source: SourceEndpoint {
                host: "sftp.example".to_owned(),
                port: 22,
                username: "reader".to_owned(),
                password: "hunter2".to_owned(),
                root: PathBuf::from("/srv/export"),
            },
            destination: DestEndpoint {
                host: "ftp.example".to_owned(),
                port: 21,
                username: None,
                password: None,
                root: "/incoming".to_owned(),
            },
            staging: PathBuf::from("./mirror"),
            compress: false,
            expected_checksum: None,
        }
    }

    #[test]
    fn verifies_reflects_checksum_presence() {
        let mut job = sample_job();
        assert!(!job.verifies());
        job.expected_checksum = Some("00".repeat(32));
        assert!(job.verifies());
    }

    #[test]
    fn job_debug_output_never_contains_passwords() {
        let job = sample_job();
        let rendered = format!("{job:?}");
        assert!(!rendered.contains("hunter2"));
    }
}

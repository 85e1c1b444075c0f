//! Error types for the fetch and push stages.
//!
//! Each variant pins the failure to the operation that raised it so the
//! orchestrator can report which stage aborted the pipeline without
//! re-deriving context from the underlying transport error.

use std::io;
use std::path::PathBuf;

use suppaftp::FtpError;
use thiserror::Error;

/// Failures raised while mirroring the source tree over SFTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The TCP connection to the source host could not be established.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        /// Source host name.
        host: String,
        /// SSH port.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The SSH session could not be established.
    #[error("SSH session error: {source}")]
    Session {
        /// Underlying library error.
        #[source]
        source: ssh2::Error,
    },

    /// Password authentication was rejected.
    #[error("authentication failed for user '{username}': {source}")]
    Auth {
        /// User name presented to the server.
        username: String,
        /// Underlying library error.
        #[source]
        source: ssh2::Error,
    },

    /// The SFTP subsystem could not be opened on the session.
    #[error("SFTP subsystem unavailable: {source}")]
    Subsystem {
        /// Underlying library error.
        #[source]
        source: ssh2::Error,
    },

    /// A remote file could not be opened or read.
    #[error("failed to read remote file '{}': {source}", path.display())]
    Remote {
        /// Path relative to the source root.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A staging-side filesystem operation failed.
    #[error("local filesystem error at '{}': {source}", path.display())]
    LocalIo {
        /// Local path involved in the failure.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Enumerating the remote tree failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),
}

/// Failures raised while uploading the payload over FTP.
#[derive(Debug, Error)]
pub enum PushError {
    /// The control connection to the destination host could not be
    /// established.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        /// Destination host name.
        host: String,
        /// FTP control port.
        port: u16,
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// The login was rejected.
    #[error("login failed for user '{username}': {source}")]
    Login {
        /// User name presented to the server.
        username: String,
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// A control-channel command outside the upload path failed.
    #[error("FTP protocol error: {source}")]
    Protocol {
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// The destination root directory could not be entered.
    #[error("destination directory '{path}' is not accessible: {source}")]
    MissingRoot {
        /// Configured destination root.
        path: String,
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// A destination subdirectory could not be created and does not already
    /// exist.
    #[error("failed to create remote directory '{path}': {source}")]
    CreateDir {
        /// Path relative to the destination root.
        path: String,
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// Uploading a file's bytes failed.
    #[error("failed to upload '{path}': {source}")]
    Upload {
        /// Path relative to the destination root.
        path: String,
        /// Underlying library error.
        #[source]
        source: FtpError,
    },

    /// Reading the local payload failed.
    #[error("local filesystem error at '{}': {source}", path.display())]
    LocalIo {
        /// Local path involved in the failure.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Enumerating the payload tree failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),
}

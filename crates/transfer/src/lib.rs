#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `transfer` implements the two network-facing stages of the relay
//! pipeline: [`fetch::fetch_tree`] pulls a remote directory tree over SFTP
//! into the local staging directory, and [`push::push_tree`] uploads the
//! staged payload over FTP to the destination host.
//!
//! Both stages open exactly one session for the duration of their work and
//! release it on every exit path through RAII scoping. File bytes are moved
//! by a blocking copy loop that reports `(done, total)` to a
//! [`progress::ProgressSink`] after every chunk; the callback is synchronous
//! with the loop, so rendering cost is paid inline.
//!
//! There is no retry logic anywhere in this crate: the pipeline is fail-fast
//! and a transient network error aborts the run like any other failure.

pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod push;

pub use endpoint::{DestEndpoint, SourceEndpoint};
pub use error::{FetchError, PushError};
pub use progress::{NoopSink, ProgressSink};

/// Chunk size for the blocking copy loops in both stages.
pub(crate) const COPY_BUF_LEN: usize = 64 * 1024;

/// Byte and file counts reported by a completed stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferTotals {
    /// Number of regular files moved.
    pub files: u64,
    /// Total payload bytes moved.
    pub bytes: u64,
}

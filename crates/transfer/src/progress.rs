//! Progress reporting for file transfers.
//!
//! Both pipeline stages report byte-level progress for the single file they
//! are currently moving. The sink is invoked synchronously from the copy
//! loop; implementations should be cheap per call.

use std::path::Path;

/// Receiver for per-file transfer progress.
///
/// Exactly one file is in flight at a time: `file_started` is always
/// followed by zero or more `file_progress` calls and one `file_finished`
/// before the next `file_started`.
pub trait ProgressSink {
    /// A new file transfer is starting.
    fn file_started(&self, relative_path: &Path, total_bytes: u64);

    /// Bytes moved so far for the in-flight file.
    fn file_progress(&self, bytes_done: u64, bytes_total: u64);

    /// The in-flight file completed.
    fn file_finished(&self, relative_path: &Path);
}

/// Sink that discards all progress events.
///
/// Used for quiet runs and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn file_started(&self, _relative_path: &Path, _total_bytes: u64) {}

    fn file_progress(&self, _bytes_done: u64, _bytes_total: u64) {}

    fn file_finished(&self, _relative_path: &Path) {}
}

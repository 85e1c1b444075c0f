//! Terminal progress rendering.

use std::path::Path;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use shuttle_core::ProgressSink;

/// [`ProgressSink`] rendering one byte-level bar per in-flight file.
///
/// The pipeline moves a single file at a time, so the sink keeps at most one
/// live bar: created on `file_started`, advanced on every chunk, and cleared
/// on `file_finished`.
pub struct BarSink {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarSink {
    /// Creates a sink with no live bar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("[{bar:40}] {percent:>3}% {bytes}/{total_bytes} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for BarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarSink {
    fn file_started(&self, relative_path: &Path, total_bytes: u64) {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(Self::style());
        bar.set_message(relative_path.display().to_string());
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn file_progress(&self, bytes_done: u64, _bytes_total: u64) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.set_position(bytes_done);
            }
        }
    }

    fn file_finished(&self, _relative_path: &Path) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_lifecycle_tracks_the_in_flight_file() {
        let sink = BarSink::new();
        assert!(sink.bar.lock().expect("lock").is_none());

        sink.file_started(Path::new("sub/b.txt"), 3);
        assert!(sink.bar.lock().expect("lock").is_some());

        sink.file_progress(3, 3);
        sink.file_finished(Path::new("sub/b.txt"));
        assert!(sink.bar.lock().expect("lock").is_none());
    }
}

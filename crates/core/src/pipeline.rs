//! The sequential transfer pipeline.
//!
//! Stages run strictly one after another; no stage starts before the
//! previous one fully completed, and the first failure terminates the run.
//! The payload path is the only state handed from stage to stage: it starts
//! as the staging directory and, when compression is requested, becomes the
//! archive file for every stage after archiving.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use transfer::{ProgressSink, TransferTotals, fetch, push};

use crate::error::{PipelineError, classify_digest_error};
use crate::job::TransferJob;

/// One sequential unit of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Mirroring the source tree into the staging directory.
    Fetching,
    /// Packing the staging directory into the archive artifact.
    Archiving,
    /// Comparing the payload digest against the expected checksum.
    Verifying,
    /// Uploading the payload to the destination host.
    Pushing,
    /// Removing artifacts that became redundant after a successful push.
    Cleanup,
    /// Terminal success state.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetching => "fetching",
            Self::Archiving => "archiving",
            Self::Verifying => "verifying",
            Self::Pushing => "pushing",
            Self::Cleanup => "cleanup",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Computes the ordered stage sequence a job will execute.
///
/// Archiving and verifying appear only when the job requests them; cleanup
/// appears only when compression leaves a redundant mirror behind.
#[must_use]
pub fn stage_plan(job: &TransferJob) -> Vec<Stage> {
    let mut plan = vec![Stage::Fetching];
    if job.compress {
        plan.push(Stage::Archiving);
    }
    if job.verifies() {
        plan.push(Stage::Verifying);
    }
    plan.push(Stage::Pushing);
    if job.compress {
        plan.push(Stage::Cleanup);
    }
    plan.push(Stage::Done);
    plan
}

/// Byte and file totals for a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Totals reported by the fetch stage.
    pub fetched: TransferTotals,
    /// Totals reported by the push stage.
    pub pushed: TransferTotals,
}

/// Runs the whole pipeline for `job`, reporting per-file progress to `sink`.
///
/// On failure the run stops at the failing stage and already-produced
/// artifacts are left on disk for inspection; in particular an archive that
/// failed to push is retained. Only a fully successful compressed run
/// removes its intermediate artifacts (archive and mirror directory).
pub fn run(job: &TransferJob, sink: &dyn ProgressSink) -> Result<TransferSummary, PipelineError> {
    let plan = stage_plan(job);
    debug!(?plan, "computed stage plan");

    info!(stage = %Stage::Fetching, "starting stage");
    let fetched = fetch::fetch_tree(&job.source, &job.staging, sink)?;

    let mut payload = job.staging.clone();
    if job.compress {
        info!(stage = %Stage::Archiving, "starting stage");
        let archive_path = archive::archive_path_for(&job.staging);
        ensure_local_payload(&job.staging)?;
        archive::pack(&job.staging, &archive_path)?;
        payload = archive_path;
        debug!(payload = %payload.display(), "payload swapped to archive artifact");
    }

    if let Some(expected) = job.expected_checksum.as_deref() {
        info!(stage = %Stage::Verifying, "starting stage");
        verify_payload(&payload, expected)?;
        info!("checksum matched");
    }

    info!(stage = %Stage::Pushing, "starting stage");
    ensure_local_payload(&payload)?;
    let pushed = push::push_tree(&job.destination, &payload, sink)?;

    if job.compress {
        info!(stage = %Stage::Cleanup, "starting stage");
        cleanup_after_push(&job.staging, &payload)?;
    }

    info!(stage = %Stage::Done, "transfer completed");
    Ok(TransferSummary { fetched, pushed })
}

/// Gate between verification and the push stage: a mismatch aborts the
/// pipeline before any destination-side network traffic.
fn verify_payload(payload: &Path, expected: &str) -> Result<(), PipelineError> {
    let actual = checksums::payload_digest(payload).map_err(classify_digest_error)?;
    if checksums::checksum_matches(expected, &actual) {
        Ok(())
    } else {
        Err(PipelineError::ChecksumMismatch {
            expected: expected.trim().to_owned(),
            actual,
        })
    }
}

fn ensure_local_payload(payload: &Path) -> Result<(), PipelineError> {
    if payload.exists() {
        Ok(())
    } else {
        Err(PipelineError::LocalPathNotFound(payload.to_path_buf()))
    }
}

/// Removes the artifacts a successful compressed run no longer needs: the
/// pushed archive and the mirror directory it was built from.
fn cleanup_after_push(staging: &Path, archive_path: &Path) -> Result<(), PipelineError> {
    fs::remove_file(archive_path).map_err(PipelineError::unclassified)?;
    fs::remove_dir_all(staging).map_err(PipelineError::unclassified)?;
    debug!(
        staging = %staging.display(),
        archive = %archive_path.display(),
        "removed redundant artifacts"
    );
    Ok(())
}

#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `core` ties the relay together: it defines the immutable [`TransferJob`]
//! configuration, the [`PipelineError`] taxonomy every stage failure maps
//! into, the process [`ExitCode`] contract, and the sequential
//! [`pipeline::run`] orchestrator that drives fetch, archive, verify, push,
//! and cleanup in order.
//!
//! The orchestrator owns the payload-path handoff between stages: after the
//! fetch stage the payload is the staging directory, and when compression is
//! requested the archive stage swaps it for a single `.tar.gz` file that the
//! remaining stages consume transparently.

pub mod error;
pub mod exit_code;
pub mod job;
pub mod pipeline;

pub use error::PipelineError;
pub use exit_code::ExitCode;
pub use job::TransferJob;
pub use pipeline::{Stage, TransferSummary, run, stage_plan};

// Re-exported so front-ends only need this crate for job construction and
// progress wiring.
pub use transfer::{DestEndpoint, NoopSink, ProgressSink, SourceEndpoint, TransferTotals};

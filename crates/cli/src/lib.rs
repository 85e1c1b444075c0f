#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the thin command-line front-end for the `oc-shuttle` binary. It
//! parses the flag surface into an immutable [`shuttle_core::TransferJob`],
//! initialises the `tracing` subscriber from `RUST_LOG` (defaulting to
//! `info`), wires a progress renderer, and maps the pipeline outcome to the
//! process exit code.
//!
//! # Invariants
//!
//! - [`run`] never panics; every failure surfaces as a non-zero exit code
//!   with one human-readable diagnostic line on standard error.
//! - Exit codes come from [`shuttle_core::ExitCode`]; this crate never
//!   hard-codes the numbers.

mod args;
mod progress;

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shuttle_core::{ExitCode, NoopSink, ProgressSink};

pub use args::Cli;
pub use progress::BarSink;

/// Parses process arguments, runs the pipeline, and returns the exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing();

    let quiet = cli.quiet;
    let job = cli.into_job();

    let sink: Box<dyn ProgressSink> = if quiet {
        Box::new(NoopSink)
    } else {
        Box::new(BarSink::new())
    };

    match shuttle_core::run(&job, sink.as_ref()) {
        Ok(summary) => {
            info!(
                files = summary.pushed.files,
                bytes = summary.pushed.bytes,
                "transfer completed"
            );
            ExitCode::Ok.as_i32()
        }
        Err(error) => {
            eprintln!("oc-shuttle: {} stage failed: {error}", error.stage_name());
            ExitCode::from(&error).as_i32()
        }
    }
}

/// Installs the global `tracing` subscriber.
///
/// Diagnostics go to standard error so progress bars and piped output stay
/// clean. `RUST_LOG` overrides the default `info` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

//! Process exit code mapping.
//!
//! The CLI contract is deliberately coarse: `0` for a fully successful run,
//! `1` for every failure (checksum mismatch, either transport, local
//! filesystem, or anything unclassified). The mapping lives here so the
//! front-end never hard-codes numbers.

use crate::error::PipelineError;

/// Exit codes returned by the relay binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,
    /// Any pipeline failure.
    Failure = 1,
}

impl ExitCode {
    /// Returns the numeric code handed to the operating system.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns the code's human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Failure => "pipeline failure",
        }
    }
}

impl From<&PipelineError> for ExitCode {
    fn from(_: &PipelineError) -> Self {
        Self::Failure
    }
}

#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(u8::try_from(cli::run()).unwrap_or(1))
}

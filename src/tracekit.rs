//! Trace-validation micro-benchmarks.
//!
//! Three fixed kernels stress a core's integer pipeline, its data cache,
//! and its fetch path. Each one is deterministic, so a simulator or trace
//! inspector can compare its result (and completion tag) against the
//! golden values recorded in [`benchmarks::ALL`].

pub mod benchmarks;
mod error;
pub mod matrix;
pub mod signal;

pub use error::Error;
pub use signal::{CompletionSignal, CompletionTag, SignalKind};

/// Initializes `env_logger` for the benchmark binaries.
///
/// Everything outside this crate stays silent; `verbosity` counts `-v` flags.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(log::LevelFilter::Off)
        .filter_module("tracebench", level)
        .filter_module("tracekit", level)
        .format_timestamp_nanos()
        .init();
}

mod fixed_delay;
mod matrix_elementwise;
mod shift_accumulate;

// Re-export benchmark functions directly.
pub use fixed_delay::fixed_delay;
pub use matrix_elementwise::{
    elementwise_difference, elementwise_sum, matrix_elementwise, run_passes, Workspace,
};
pub use shift_accumulate::{halve_by_shift, repeated_add_multiply, shift_accumulate};

use crate::signal::{CompletionSignal, CompletionTag};
use crate::Error;
use regex::Regex;

/// A registered benchmark kernel and its golden result.
#[derive(Debug)]
pub struct Benchmark {
    pub name: &'static str,
    pub summary: &'static str,
    pub expected: i32,
    pub completion_tag: Option<CompletionTag>,
    run: fn(&mut dyn CompletionSignal) -> i32,
}

fn run_shift_accumulate(signal: &mut dyn CompletionSignal) -> i32 {
    shift_accumulate(signal)
}

fn run_matrix_elementwise(_signal: &mut dyn CompletionSignal) -> i32 {
    matrix_elementwise()
}

fn run_fixed_delay(signal: &mut dyn CompletionSignal) -> i32 {
    fixed_delay(signal)
}

pub static ALL: [Benchmark; 3] = [
    Benchmark {
        name: "shift_accumulate",
        summary: "10x10 shift-halving and repeated-add multiply sweep",
        expected: shift_accumulate::EXPECTED,
        completion_tag: Some(CompletionTag::SHIFT_ACCUMULATE),
        run: run_shift_accumulate,
    },
    Benchmark {
        name: "matrix_elementwise",
        summary: "three passes over five 100x100 integer matrices",
        expected: matrix_elementwise::EXPECTED,
        completion_tag: None,
        run: run_matrix_elementwise,
    },
    Benchmark {
        name: "fixed_delay",
        summary: "3200 nop instructions with no data dependency",
        expected: fixed_delay::EXPECTED,
        completion_tag: Some(CompletionTag::FIXED_DELAY),
        run: run_fixed_delay,
    },
];

impl Benchmark {
    /// Runs the kernel once, reporting completion to `signal`.
    pub fn execute(&self, signal: &mut dyn CompletionSignal) -> i32 {
        log::info!("Running {}", self.name);
        let result = (self.run)(signal);
        log::info!("{} returned {}", self.name, result);
        result
    }

    pub fn verify(&self, actual: i32) -> Result<(), Error> {
        if actual == self.expected {
            Ok(())
        } else {
            Err(Error::Mismatch {
                name: self.name,
                expected: self.expected,
                actual,
            })
        }
    }
}

pub fn find(name: &str) -> Result<&'static Benchmark, Error> {
    ALL.iter()
        .find(|bench| bench.name == name)
        .ok_or_else(|| Error::UnknownBenchmark(name.to_owned()))
}

/// Benchmarks whose names match `pattern`, in registry order.
pub fn matching(pattern: &str) -> Result<Vec<&'static Benchmark>, Error> {
    let re = Regex::new(pattern)?;
    Ok(ALL.iter().filter(|bench| re.is_match(bench.name)).collect())
}

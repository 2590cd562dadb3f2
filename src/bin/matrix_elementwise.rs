use std::process;
use tracekit::benchmarks;

fn main() {
    tracekit::init_logging(1);

    // This kernel has no completion tag; its result is the only output.
    process::exit(benchmarks::matrix_elementwise());
}

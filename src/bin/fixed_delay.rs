use std::process;
use tracekit::benchmarks;
use tracekit::signal;

fn main() {
    tracekit::init_logging(1);

    let mut signal = signal::default_signal();
    let result = benchmarks::fixed_delay(signal.as_mut());
    process::exit(result);
}

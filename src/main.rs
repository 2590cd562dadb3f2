use clap::Parser;
use std::process;
use tracekit::benchmarks::{self, Benchmark};
use tracekit::{Error, SignalKind};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Name of benchmark to run.
    #[arg()]
    benchmark: Option<String>,

    /// Only consider benchmarks whose name matches this regex.
    #[arg(short, long)]
    filter: Option<String>,

    /// Enumerate all available benchmarks.
    #[arg(short, long)]
    list: bool,

    /// Where the completion tag is reported.
    #[arg(short, long, value_enum, default_value_t = SignalKind::Log)]
    signal: SignalKind,

    /// Compare results against the recorded golden values.
    #[arg(long)]
    verify: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    tracekit::init_logging(args.verbose);

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn selected(args: &Args) -> Result<Vec<&'static Benchmark>, Error> {
    match args.filter.as_deref() {
        Some(pattern) => benchmarks::matching(pattern),
        None => Ok(benchmarks::ALL.iter().collect()),
    }
}

/// Returns the process exit code.
fn run(args: &Args) -> Result<i32, Error> {
    if args.list {
        for bench in selected(args)? {
            println!("{:<20} {:>8}  {}", bench.name, bench.expected, bench.summary);
        }
        return Ok(0);
    }

    let mut signal = args.signal.build()?;

    match (args.benchmark.as_deref(), args.filter.as_deref()) {
        (Some(name), filter) => {
            let bench = benchmarks::find(name)?;
            if let Some(pattern) = filter {
                let allowed = benchmarks::matching(pattern)?;
                if !allowed.iter().any(|candidate| candidate.name == bench.name) {
                    return Err(Error::Excluded {
                        name: name.to_owned(),
                        pattern: pattern.to_owned(),
                    });
                }
            }
            let result = bench.execute(signal.as_mut());
            if args.verify {
                bench.verify(result)?;
                Ok(0)
            } else {
                // Same contract as the bare programs: the result is the exit value.
                Ok(result)
            }
        }
        (None, Some(pattern)) => {
            let benches = selected(args)?;
            if benches.is_empty() {
                return Err(Error::NoMatch(pattern.to_owned()));
            }
            let mut failed = 0;
            for bench in benches {
                let result = bench.execute(signal.as_mut());
                match bench.verify(result) {
                    Ok(()) => println!("{}: {} ok", bench.name, result),
                    Err(err) => {
                        eprintln!("{}", err);
                        failed += 1;
                    }
                }
            }
            Ok(if failed == 0 { 0 } else { 1 })
        }
        (None, None) => {
            eprintln!("No benchmark specified.");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let argv = std::iter::once("tracebench").chain(argv.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn list_exits_zero() {
        assert_eq!(run(&parse(&["--list"])).unwrap(), 0);
        assert_eq!(run(&parse(&["--list", "--filter", "^none$"])).unwrap(), 0);
    }

    #[test]
    fn missing_benchmark_exits_one() {
        assert_eq!(run(&parse(&["--signal", "silent"])).unwrap(), 1);
    }

    #[test]
    fn result_is_exit_value() {
        let args = parse(&["matrix_elementwise", "-s", "silent"]);
        assert_eq!(run(&args).unwrap(), 12);
        let args = parse(&["shift_accumulate", "-s", "silent"]);
        assert_eq!(run(&args).unwrap(), 94095);
    }

    #[test]
    fn verify_exits_zero_on_match() {
        let args = parse(&["shift_accumulate", "--verify", "-s", "silent"]);
        assert_eq!(run(&args).unwrap(), 0);
    }

    #[test]
    fn verify_mismatch_is_an_error() {
        let bench = benchmarks::find("fixed_delay").unwrap();
        assert!(matches!(
            bench.verify(1),
            Err(Error::Mismatch {
                name: "fixed_delay",
                expected: 0,
                actual: 1
            })
        ));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let args = parse(&["nope", "-s", "silent"]);
        assert!(matches!(run(&args), Err(Error::UnknownBenchmark(name)) if name == "nope"));
    }

    #[test]
    fn bad_filter_is_an_error() {
        let args = parse(&["--filter", "(", "-s", "silent"]);
        assert!(matches!(run(&args), Err(Error::Filter(_))));
        let args = parse(&["--list", "--filter", "("]);
        assert!(matches!(run(&args), Err(Error::Filter(_))));
    }

    #[test]
    fn filter_excludes_named_benchmark() {
        let args = parse(&[
            "shift_accumulate",
            "--filter",
            "^none$",
            "--verify",
            "-s",
            "silent",
        ]);
        assert!(matches!(run(&args), Err(Error::Excluded { .. })));

        let args = parse(&[
            "shift_accumulate",
            "--filter",
            "^shift",
            "--verify",
            "-s",
            "silent",
        ]);
        assert_eq!(run(&args).unwrap(), 0);
    }

    #[test]
    fn empty_filter_selection_is_an_error() {
        let args = parse(&["--filter", "^none$", "-s", "silent"]);
        assert!(matches!(run(&args), Err(Error::NoMatch(pattern)) if pattern == "^none$"));
    }

    #[test]
    fn filter_runs_and_verifies_matches() {
        let args = parse(&["--filter", "elementwise|delay", "-s", "silent"]);
        assert_eq!(run(&args).unwrap(), 0);
    }
}

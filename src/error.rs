use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown benchmark `{0}`")]
    UnknownBenchmark(String),

    #[error("benchmark `{name}` is excluded by filter `{pattern}`")]
    Excluded { name: String, pattern: String },

    #[error("no benchmark matches filter `{0}`")]
    NoMatch(String),

    #[error("invalid benchmark filter: {0}")]
    Filter(#[from] regex::Error),

    #[error("register completion signal is not available on {arch}")]
    RegisterUnavailable { arch: &'static str },

    #[error("{name} returned {actual}, expected {expected}")]
    Mismatch {
        name: &'static str,
        expected: i32,
        actual: i32,
    },
}

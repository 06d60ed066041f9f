//! Error types for ingestion and orchestration
//!
//! Kernel failures that carry an index or a dimension disagreement are lifted
//! into the top-level variant of the same name, so callers match on a single
//! taxonomy regardless of which layer detected the problem.

use thiserror::Error;
use tricount_kernels::KernelError;

/// Top-level errors
#[derive(Error, Debug)]
pub enum TricountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported matrix type: {0}")]
    UnsupportedFormat(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    InvalidIndex { index: u64, vertex_count: usize },

    #[error("Clock went backwards by {secs} seconds and {nanos} nanoseconds")]
    ClockRegression { secs: i64, nanos: i64 },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Verification failed: sparse count {sparse} but dense reference found {dense}")]
    VerificationFailed { sparse: u64, dense: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Kernel error: {0}")]
    Kernel(#[source] KernelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<KernelError> for TricountError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::InvalidIndex { index, vertex_count } => {
                TricountError::InvalidIndex { index, vertex_count }
            }
            KernelError::DimensionMismatch(msg) => TricountError::DimensionMismatch(msg),
            other => TricountError::Kernel(other),
        }
    }
}

pub type TricountResult<T> = Result<T, TricountError>;

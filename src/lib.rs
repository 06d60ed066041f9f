//! Tricount
//!
//! Parallel triangle counting for large sparse undirected graphs.
//!
//! # Architecture
//!
//! - `tricount-kernels`: COO edge lists, CSC construction, neighbor sorting,
//!   merge intersection and the parallel counting strategies
//! - `mtx`: Matrix Market ingestion (plain or gzip)
//! - `config`: run settings from defaults, YAML and flags
//! - `timing`: monotonic nanosecond timing
//! - `pipeline`: load, build, count, verify
//! - `report`: serialisable run summary

pub mod config;
pub mod error;
pub mod mtx;
pub mod pipeline;
pub mod report;
pub mod timing;

pub use config::RunConfig;
pub use error::{TricountError, TricountResult};
pub use mtx::{MatrixField, MatrixFormat, MatrixHeader, MatrixMarket, MatrixSymmetry};
pub use pipeline::{Pipeline, MAX_RANDOM_VERTICES};
pub use report::{GraphSummary, Report};
pub use timing::{Elapsed, Stopwatch, Timespec};

pub use tricount_kernels as kernels;
pub use tricount_kernels::{
    CooEdges, CscAdjacency, IndexBase, Strategy, TriangleCounts, VertexId, MAX_VERTICES,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

//! Error types for the counting kernels

use thiserror::Error;

/// Errors raised while building or counting over a compressed adjacency
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// An edge endpoint (after index-base normalisation) is outside `[0, N)`
    #[error("Invalid index: {index} is out of range for {vertex_count} vertices")]
    InvalidIndex { index: u64, vertex_count: usize },

    /// Declared sizes disagree with the data actually supplied
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A neighbor slice is not strictly ascending, so merge intersection would undercount
    #[error("Neighbor list of vertex {vertex} is not strictly ascending")]
    Unsorted { vertex: usize },

    /// The worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type KernelResult<T> = Result<T, KernelError>;

//! Sparse triangle counting kernels
//!
//! COO edge lists are turned into a sorted, symmetric CSC adjacency and
//! triangles are counted with merge intersection of neighbor slices, in
//! parallel on rayon.

pub mod common;
pub mod coo;
pub mod dense;
pub mod error;
pub mod generators;
pub mod index_builder;
pub mod intersect;
pub mod sorter;
pub mod triangles;

pub use common::{CscAdjacency, VertexId};
pub use coo::{CooEdges, IndexBase, MAX_VERTICES};
pub use dense::{DenseAdjacency, MAX_DENSE_VERTICES};
pub use error::{KernelError, KernelResult};
pub use index_builder::{build_csc, coo_to_csc, symmetric_adjacency};
pub use intersect::{for_each_common, intersection_count};
pub use sorter::{dedup_neighbors, par_sort_neighbors, sort_neighbors};
pub use triangles::{count_triangles, local_triangle_count, CountOptions, Strategy, TriangleCounts};

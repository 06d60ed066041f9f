//! Shared utilities for the counting kernels
//!
//! Provides the read-only compressed adjacency that every kernel operates on.

use crate::error::{KernelError, KernelResult};
use std::mem;

/// Vertex identifier (dense, 0-based)
pub type VertexId = u32;

/// A dense, integer-indexed view of an undirected graph in Compressed Sparse Column (CSC) format.
///
/// For a symmetric adjacency matrix the column of vertex `i` and its row are the same
/// set, so the slice `neighbors[offsets[i]..offsets[i + 1]]` is simply the neighbor
/// list of `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CscAdjacency {
    /// Column pointers. Size = vertex_count + 1, non-decreasing, last = neighbors.len()
    offsets: Vec<usize>,
    /// Contiguous array of row indices, grouped per column
    neighbors: Vec<VertexId>,
}

impl CscAdjacency {
    /// Build from raw CSC parts, checking every structural invariant.
    ///
    /// Sort order is not checked here; see [`CscAdjacency::is_sorted`].
    pub fn from_parts(offsets: Vec<usize>, neighbors: Vec<VertexId>) -> KernelResult<Self> {
        if offsets.is_empty() {
            return Err(KernelError::DimensionMismatch(
                "offsets must have length vertex_count + 1".to_string(),
            ));
        }
        if offsets[0] != 0 {
            return Err(KernelError::DimensionMismatch(format!(
                "offsets must start at 0, found {}",
                offsets[0]
            )));
        }
        if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(KernelError::DimensionMismatch(format!(
                "offsets decrease between vertex {} and {}",
                i,
                i + 1
            )));
        }
        let last = offsets[offsets.len() - 1];
        if last != neighbors.len() {
            return Err(KernelError::DimensionMismatch(format!(
                "last offset {} does not match {} stored neighbors",
                last,
                neighbors.len()
            )));
        }
        let n = offsets.len() - 1;
        if let Some(&bad) = neighbors.iter().find(|&&u| u as usize >= n) {
            return Err(KernelError::InvalidIndex {
                index: bad as u64,
                vertex_count: n,
            });
        }
        Ok(Self { offsets, neighbors })
    }

    /// Crate-internal constructor for parts that are valid by construction
    pub(crate) fn from_parts_unchecked(offsets: Vec<usize>, neighbors: Vec<VertexId>) -> Self {
        debug_assert_eq!(offsets.last().copied(), Some(neighbors.len()));
        Self { offsets, neighbors }
    }

    /// An empty structure on `vertex_count` isolated vertices
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            offsets: vec![0; vertex_count + 1],
            neighbors: Vec::new(),
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of stored arcs (each undirected edge is two arcs)
    pub fn arc_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges, assuming a symmetric structure
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Degree of a vertex
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Neighbor slice of a vertex
    pub fn neighbors(&self, v: usize) -> &[VertexId] {
        let start = self.offsets[v];
        let end = self.offsets[v + 1];
        &self.neighbors[start..end]
    }

    /// Whether the arc `u -> v` is stored. Requires sorted slices.
    pub fn has_arc(&self, u: usize, v: VertexId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Column pointer array
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Flat row index array
    pub fn neighbor_array(&self) -> &[VertexId] {
        &self.neighbors
    }

    /// First vertex whose slice is not strictly ascending, if any
    pub fn first_unsorted(&self) -> Option<usize> {
        (0..self.vertex_count()).find(|&v| self.neighbors(v).windows(2).any(|w| w[0] >= w[1]))
    }

    /// True when every slice is strictly ascending
    pub fn is_sorted(&self) -> bool {
        self.first_unsorted().is_none()
    }

    /// Highest degree in the graph (0 for an empty graph)
    pub fn max_degree(&self) -> usize {
        (0..self.vertex_count())
            .map(|v| self.degree(v))
            .max()
            .unwrap_or(0)
    }

    /// Estimate heap plus inline memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Self>()
            + self.offsets.capacity() * mem::size_of::<usize>()
            + self.neighbors.capacity() * mem::size_of::<VertexId>()
    }

    /// Mutable access for in-crate passes (sorting, compaction)
    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<usize>, &mut Vec<VertexId>) {
        (&mut self.offsets, &mut self.neighbors)
    }

    /// Consume into `(offsets, neighbors)`
    pub fn into_parts(self) -> (Vec<usize>, Vec<VertexId>) {
        (self.offsets, self.neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_accessors() {
        // 0 - 1, 1 - 2
        let csc = CscAdjacency::from_parts(vec![0, 1, 3, 4], vec![1, 0, 2, 1]).unwrap();

        assert_eq!(csc.vertex_count(), 3);
        assert_eq!(csc.arc_count(), 4);
        assert_eq!(csc.edge_count(), 2);
        assert_eq!(csc.neighbors(1), &[0, 2]);
        assert_eq!(csc.degree(0), 1);
        assert_eq!(csc.max_degree(), 2);
        assert!(csc.has_arc(1, 2));
        assert!(!csc.has_arc(0, 2));
        assert!(csc.is_sorted());
    }

    #[test]
    fn test_from_parts_rejects_bad_structure() {
        assert!(matches!(
            CscAdjacency::from_parts(vec![], vec![]),
            Err(KernelError::DimensionMismatch(_))
        ));
        assert!(matches!(
            CscAdjacency::from_parts(vec![0, 2, 1], vec![0, 1]),
            Err(KernelError::DimensionMismatch(_))
        ));
        assert!(matches!(
            CscAdjacency::from_parts(vec![0, 1, 3], vec![1, 0]),
            Err(KernelError::DimensionMismatch(_))
        ));
        assert_eq!(
            CscAdjacency::from_parts(vec![0, 1, 2], vec![1, 5]),
            Err(KernelError::InvalidIndex { index: 5, vertex_count: 2 })
        );
    }

    #[test]
    fn test_empty_and_isolated_vertices() {
        let csc = CscAdjacency::empty(4);
        assert_eq!(csc.vertex_count(), 4);
        assert_eq!(csc.arc_count(), 0);
        for v in 0..4 {
            assert!(csc.neighbors(v).is_empty());
        }
        assert!(csc.is_sorted());
        assert_eq!(csc.max_degree(), 0);
    }

    #[test]
    fn test_unsorted_detection() {
        let csc = CscAdjacency::from_parts(vec![0, 2, 3, 4], vec![2, 1, 0, 0]).unwrap();
        assert_eq!(csc.first_unsorted(), Some(0));

        // Duplicates are not strictly ascending either
        let dup = CscAdjacency::from_parts(vec![0, 2, 4], vec![1, 1, 0, 0]).unwrap();
        assert_eq!(dup.first_unsorted(), Some(0));
    }
}

//! Dense brute-force reference
//!
//! Materialises the adjacency matrix and checks every vertex triple. O(N³) time
//! and O(N²) memory, so it is only meant for validating the sparse kernels on
//! small graphs.

use crate::common::CscAdjacency;
use crate::coo::CooEdges;
use crate::error::{KernelError, KernelResult};
use ndarray::Array2;

/// Largest graph the dense reference accepts
pub const MAX_DENSE_VERTICES: usize = 8000;

/// Symmetric 0/1 adjacency matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseAdjacency {
    matrix: Array2<u8>,
}

impl DenseAdjacency {
    fn zeros(n: usize) -> KernelResult<Self> {
        if n > MAX_DENSE_VERTICES {
            return Err(KernelError::DimensionMismatch(format!(
                "dense reference supports at most {} vertices, got {}",
                MAX_DENSE_VERTICES, n
            )));
        }
        Ok(Self {
            matrix: Array2::zeros((n, n)),
        })
    }

    /// Materialise a compressed adjacency
    pub fn from_csc(csc: &CscAdjacency) -> KernelResult<Self> {
        let mut dense = Self::zeros(csc.vertex_count())?;
        for v in 0..csc.vertex_count() {
            for &u in csc.neighbors(v) {
                dense.matrix[[u as usize, v]] = 1;
            }
        }
        Ok(dense)
    }

    /// Materialise an edge list, symmetrising it and dropping self-loops
    pub fn from_coo(coo: &CooEdges) -> KernelResult<Self> {
        let mut dense = Self::zeros(coo.vertex_count())?;
        for (r, c) in coo.iter() {
            if r != c {
                dense.matrix[[r as usize, c as usize]] = 1;
                dense.matrix[[c as usize, r as usize]] = 1;
            }
        }
        Ok(dense)
    }

    pub fn vertex_count(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.matrix[[i, j]] != 0
    }

    /// Per-vertex triangle membership by checking every triple `i < j < k`
    pub fn brute_force_counts(&self) -> Vec<u64> {
        let n = self.vertex_count();
        let a = &self.matrix;
        let mut count = vec![0u64; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if a[[i, j]] == 0 {
                    continue;
                }
                for k in (j + 1)..n {
                    if a[[j, k]] != 0 && a[[k, i]] != 0 {
                        count[i] += 1;
                        count[j] += 1;
                        count[k] += 1;
                    }
                }
            }
        }
        count
    }

    /// Number of distinct triangles
    pub fn brute_force_total(&self) -> u64 {
        self.brute_force_counts().iter().sum::<u64>() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coo::IndexBase;
    use crate::generators::{complete_graph, random_graph};
    use crate::index_builder::symmetric_adjacency;
    use crate::triangles::{count_triangles, CountOptions, Strategy};
    use rand::prelude::*;

    #[test]
    fn test_square_with_diagonal() {
        let coo = CooEdges::from_pairs(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)], IndexBase::Zero)
            .unwrap();
        let dense = DenseAdjacency::from_coo(&coo).unwrap();
        assert_eq!(dense.brute_force_counts(), vec![2, 1, 2, 1]);
        assert_eq!(dense.brute_force_total(), 2);
    }

    #[test]
    fn test_from_csc_matches_from_coo() {
        let coo = complete_graph(6);
        let csc = symmetric_adjacency(&coo).unwrap();
        assert_eq!(DenseAdjacency::from_csc(&csc).unwrap(), DenseAdjacency::from_coo(&coo).unwrap());
        assert!(DenseAdjacency::from_csc(&csc).unwrap().has_edge(0, 5));
    }

    #[test]
    fn test_sparse_kernels_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let n = rng.gen_range(1..60);
            let coo = random_graph(n, 0.5, &mut rng);
            let expected = DenseAdjacency::from_coo(&coo).unwrap().brute_force_counts();
            let csc = symmetric_adjacency(&coo).unwrap();
            for strategy in Strategy::ALL {
                let counts = count_triangles(&csc, &CountOptions::new(strategy, 4)).unwrap();
                assert_eq!(counts.per_vertex(), expected.as_slice(), "{}", strategy);
            }
        }
    }

    #[test]
    fn test_rejects_oversized_graphs() {
        let csc = CscAdjacency::empty(MAX_DENSE_VERTICES + 1);
        assert!(matches!(
            DenseAdjacency::from_csc(&csc),
            Err(KernelError::DimensionMismatch(_))
        ));
    }
}

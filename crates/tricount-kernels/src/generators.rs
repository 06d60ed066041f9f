//! Graph generators
//!
//! Every generator lists each undirected edge once, 0-based. Run the result
//! through `symmetric_adjacency` before counting.

use crate::common::VertexId;
use crate::coo::CooEdges;
use rand::Rng;

fn assemble(vertex_count: usize, rows: Vec<VertexId>, cols: Vec<VertexId>) -> CooEdges {
    CooEdges::from_zero_based_unchecked(vertex_count, rows, cols)
}

/// Random graph: each unordered pair `{i, j}` is an edge with probability `p`
pub fn random_graph<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> CooEdges {
    let p = p.clamp(0.0, 1.0);
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for i in 0..n {
        for j in 0..i {
            if rng.gen_bool(p) {
                rows.push(i as VertexId);
                cols.push(j as VertexId);
            }
        }
    }
    assemble(n, rows, cols)
}

/// Sparse random graph: `m` endpoint pairs drawn uniformly, self-loops redrawn.
///
/// Linear in `m`, unlike `random_graph`. Repeated pairs are possible and are
/// removed by `symmetric_adjacency`.
pub fn random_sparse_graph<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> CooEdges {
    if n < 2 {
        return assemble(n, Vec::new(), Vec::new());
    }
    let mut rows = Vec::with_capacity(m);
    let mut cols = Vec::with_capacity(m);
    while rows.len() < m {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i != j {
            rows.push(i as VertexId);
            cols.push(j as VertexId);
        }
    }
    assemble(n, rows, cols)
}

/// Complete graph `K_n`
pub fn complete_graph(n: usize) -> CooEdges {
    let mut rows = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    let mut cols = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            rows.push(i as VertexId);
            cols.push(j as VertexId);
        }
    }
    assemble(n, rows, cols)
}

/// Path `0 - 1 - ... - (n-1)`
pub fn path_graph(n: usize) -> CooEdges {
    let rows = (1..n).map(|i| (i - 1) as VertexId).collect();
    let cols = (1..n).map(|i| i as VertexId).collect();
    assemble(n, rows, cols)
}

/// Cycle on `n` vertices (a path for `n < 3`)
pub fn cycle_graph(n: usize) -> CooEdges {
    if n < 3 {
        return path_graph(n);
    }
    let rows = (0..n).map(|i| i as VertexId).collect();
    let cols = (0..n).map(|i| ((i + 1) % n) as VertexId).collect();
    assemble(n, rows, cols)
}

/// Complete bipartite graph `K_{a,b}`; the first `a` vertices form one side
pub fn complete_bipartite(a: usize, b: usize) -> CooEdges {
    let mut rows = Vec::with_capacity(a * b);
    let mut cols = Vec::with_capacity(a * b);
    for i in 0..a {
        for j in 0..b {
            rows.push(i as VertexId);
            cols.push((a + j) as VertexId);
        }
    }
    assemble(a + b, rows, cols)
}

//! Triangle counting over a sorted CSC adjacency
//!
//! Three traversal strategies share the same contract: the adjacency is read-only
//! and shared by all workers, and each worker only ever writes counters it owns.
//!
//! - `EdgeMerge`: one unit per vertex `v`, summing `|N(u) ∩ N(v)|` over every
//!   neighbor `u`. The unit owns slot `v` exclusively.
//! - `Ordered`: each triangle `w < u < v` is enumerated once from `v` and credited
//!   to all three corners. Each worker owns one private tally; the tallies are
//!   summed once at the end.
//! - `MaskedProduct`: `A ⊙ (A · A)`, scanning every column for each vertex.
//!   Quadratic in the vertex count; kept as a cross-check of `EdgeMerge`.

use crate::common::{CscAdjacency, VertexId};
use crate::error::{KernelError, KernelResult};
use crate::intersect::{for_each_common, intersection_count, prefix_below};
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Traversal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Per-vertex merge over all incident arcs
    #[default]
    EdgeMerge,
    /// Each triangle once, in canonical vertex order
    Ordered,
    /// Masked matrix product `A ⊙ A²`
    MaskedProduct,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::EdgeMerge, Strategy::Ordered, Strategy::MaskedProduct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::EdgeMerge => "edge-merge",
            Strategy::Ordered => "ordered",
            Strategy::MaskedProduct => "masked-product",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown strategy '{}'", s))
    }
}

/// Counting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountOptions {
    /// Traversal strategy
    pub strategy: Strategy,
    /// Worker threads; 0 runs on rayon's global pool
    pub threads: usize,
}

impl CountOptions {
    pub fn new(strategy: Strategy, threads: usize) -> Self {
        Self { strategy, threads }
    }
}

/// Result of a triangle count
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriangleCounts {
    /// Number of distinct triangles
    total: u64,
    /// Number of triangles each vertex belongs to
    per_vertex: Vec<u64>,
    /// Strategy that produced the counts
    strategy: Strategy,
}

impl TriangleCounts {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn per_vertex(&self) -> &[u64] {
        &self.per_vertex
    }

    pub fn vertex(&self, v: usize) -> u64 {
        self.per_vertex[v]
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of vertices that belong to at least one triangle
    pub fn participating_vertices(&self) -> usize {
        self.per_vertex.iter().filter(|&&c| c > 0).count()
    }

    /// Vertex with the most triangles (lowest id on ties)
    pub fn max_vertex(&self) -> Option<(usize, u64)> {
        self.per_vertex
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (v, c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((v, c)),
            })
    }

    pub fn into_per_vertex(self) -> Vec<u64> {
        self.per_vertex
    }
}

/// Count triangles globally and per vertex.
///
/// The adjacency must be symmetric with strictly ascending neighbor slices; an
/// unsorted slice is reported as `Unsorted` instead of producing an undercount.
pub fn count_triangles(csc: &CscAdjacency, options: &CountOptions) -> KernelResult<TriangleCounts> {
    if let Some(vertex) = csc.first_unsorted() {
        return Err(KernelError::Unsorted { vertex });
    }

    let strategy = options.strategy;
    let run = || match strategy {
        Strategy::EdgeMerge => edge_merge(csc),
        Strategy::Ordered => ordered(csc),
        Strategy::MaskedProduct => masked_product(csc),
    };

    let per_vertex = if options.threads == 0 {
        debug!("Counting with {} on the global pool", strategy);
        run()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
            .map_err(|e| KernelError::ThreadPool(e.to_string()))?;
        debug!("Counting with {} on {} workers", strategy, options.threads);
        pool.install(run)
    };

    // Every triangle is a member at exactly three vertices
    let sum: u64 = per_vertex.iter().sum();
    let total = sum / 3;

    info!(
        "Counted {} triangles over {} vertices ({})",
        total,
        csc.vertex_count(),
        strategy
    );

    Ok(TriangleCounts {
        total,
        per_vertex,
        strategy,
    })
}

/// Number of triangles a single vertex belongs to
pub fn local_triangle_count(csc: &CscAdjacency, v: usize) -> u64 {
    halve(raw_vertex_tally(csc, v))
}

/// Sum of `|N(u) ∩ N(v)|` over the neighbors `u` of `v`; each triangle at `v` is seen twice
fn raw_vertex_tally(csc: &CscAdjacency, v: usize) -> u64 {
    let nv = csc.neighbors(v);
    nv.iter()
        .map(|&u| intersection_count(csc.neighbors(u as usize), nv) as u64)
        .sum()
}

/// Raw tallies see each triangle from both arcs at a vertex. Odd values are rounded up.
#[inline]
fn halve(raw: u64) -> u64 {
    raw.div_ceil(2)
}

fn edge_merge(csc: &CscAdjacency) -> Vec<u64> {
    let mut tally = vec![0u64; csc.vertex_count()];
    tally
        .par_iter_mut()
        .enumerate()
        .for_each(|(v, slot)| *slot = halve(raw_vertex_tally(csc, v)));
    tally
}

fn ordered(csc: &CscAdjacency) -> Vec<u64> {
    let n = csc.vertex_count();
    let workers = rayon::current_num_threads().clamp(1, n.max(1));
    debug!("Ordered count: {} private tallies of {} vertices", workers, n);

    (0..workers)
        .into_par_iter()
        .map(|worker| ordered_worker(csc, worker, workers))
        .reduce_with(|mut left, right| {
            for (l, r) in left.iter_mut().zip(right) {
                *l += r;
            }
            left
        })
        .unwrap_or_else(|| vec![0u64; n])
}

/// One worker's private tally over vertices `worker, worker + workers, ...`.
///
/// Cyclic assignment spreads the high-id vertices, which own the longest
/// lower prefixes, across all workers.
fn ordered_worker(csc: &CscAdjacency, worker: usize, workers: usize) -> Vec<u64> {
    let n = csc.vertex_count();
    let mut acc = vec![0u64; n];
    for v in (worker..n).step_by(workers) {
        let nv = csc.neighbors(v);
        for &u in prefix_below(nv, v as VertexId) {
            let below_u_from_v = prefix_below(nv, u);
            let below_u_from_u = prefix_below(csc.neighbors(u as usize), u);
            for_each_common(below_u_from_u, below_u_from_v, |w| {
                acc[w as usize] += 1;
                acc[u as usize] += 1;
                acc[v] += 1;
            });
        }
    }
    acc
}

fn masked_product(csc: &CscAdjacency) -> Vec<u64> {
    let n = csc.vertex_count();
    let mut tally = vec![0u64; n];
    tally.par_iter_mut().enumerate().for_each(|(i, slot)| {
        let ni = csc.neighbors(i);
        if ni.is_empty() {
            return;
        }
        let mut sum = 0u64;
        for j in 0..n {
            let nj = csc.neighbors(j);
            if nj.is_empty() {
                continue;
            }
            // A²(i, j), kept only where A(i, j) is set
            let common = intersection_count(ni, nj);
            if common != 0 && csc.has_arc(i, j as VertexId) {
                sum += common as u64;
            }
        }
        *slot = halve(sum);
    });
    tally
}

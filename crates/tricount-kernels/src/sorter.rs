//! Per-vertex neighbor ordering
//!
//! Merge intersection only works on strictly ascending slices. Every sort here is
//! bounded to a single vertex's `[offsets[i], offsets[i + 1])` range.

use crate::common::{CscAdjacency, VertexId};
use rayon::prelude::*;
use std::mem;
use tracing::debug;

/// Sort every neighbor slice in place, one vertex at a time
pub fn sort_neighbors(csc: &mut CscAdjacency) {
    let (offsets, neighbors) = csc.parts_mut();
    for slice in vertex_slices_mut(offsets, neighbors) {
        slice.sort_unstable();
    }
}

/// Sort every neighbor slice in place, one rayon task per vertex
pub fn par_sort_neighbors(csc: &mut CscAdjacency) {
    let (offsets, neighbors) = csc.parts_mut();
    vertex_slices_mut(offsets, neighbors)
        .into_par_iter()
        .for_each(|slice| slice.sort_unstable());
}

/// Remove repeated neighbors from sorted slices, compacting the arrays.
///
/// Returns the number of arcs removed.
pub fn dedup_neighbors(csc: &mut CscAdjacency) -> usize {
    let (offsets, neighbors) = csc.parts_mut();
    let n = offsets.len() - 1;

    let mut write = 0;
    let mut start = offsets[0];
    for v in 0..n {
        // offsets[v + 1] is read before it is rewritten on the next iteration
        let end = offsets[v + 1];
        offsets[v] = write;
        let mut prev: Option<VertexId> = None;
        for read in start..end {
            let x = neighbors[read];
            if prev != Some(x) {
                neighbors[write] = x;
                write += 1;
                prev = Some(x);
            }
        }
        start = end;
    }
    offsets[n] = write;

    let removed = neighbors.len() - write;
    neighbors.truncate(write);
    if removed > 0 {
        debug!("Removed {} duplicate arcs", removed);
    }
    removed
}

/// Split the flat neighbor array into one disjoint mutable slice per vertex
fn vertex_slices_mut<'a>(offsets: &[usize], neighbors: &'a mut [VertexId]) -> Vec<&'a mut [VertexId]> {
    let mut slices = Vec::with_capacity(offsets.len().saturating_sub(1));
    let mut rest = neighbors;
    for w in offsets.windows(2) {
        let (head, tail) = mem::take(&mut rest).split_at_mut(w[1] - w[0]);
        slices.push(head);
        rest = tail;
    }
    slices
}

//! COO to CSC conversion
//!
//! Counting sort over the column index: one pass to size each column, an
//! exclusive prefix sum for the column pointers, and a second pass that drops
//! every row index into its column through a separate write cursor. The
//! column pointers are never used as scratch space, so nothing has to be
//! restored afterwards.

use crate::common::{CscAdjacency, VertexId};
use crate::coo::{CooEdges, IndexBase, MAX_VERTICES};
use crate::error::{KernelError, KernelResult};
use crate::sorter::{dedup_neighbors, par_sort_neighbors};
use tracing::{debug, info};

/// Build the sorted, de-duplicated, symmetric adjacency of an edge list.
///
/// Every undirected edge ends up as two arcs, self-loops are dropped and each
/// neighbor slice is strictly ascending, ready for merge intersection.
pub fn symmetric_adjacency(coo: &CooEdges) -> KernelResult<CscAdjacency> {
    let sym = coo.symmetrize();
    let mut csc = coo_to_csc(&sym)?;
    par_sort_neighbors(&mut csc);
    let removed = dedup_neighbors(&mut csc);

    info!(
        "Prepared adjacency: {} vertices, {} edges ({} input entries, {} duplicate arcs dropped)",
        csc.vertex_count(),
        csc.edge_count(),
        coo.nnz(),
        removed
    );
    Ok(csc)
}

/// Convert a validated edge list into CSC form.
///
/// Neighbor slices come out in input order; sorting is a separate pass.
pub fn coo_to_csc(coo: &CooEdges) -> KernelResult<CscAdjacency> {
    build_csc(coo.vertex_count(), coo.rows(), coo.cols(), coo.base())
}

/// Convert raw parallel arrays into CSC form.
///
/// `base` selects the index convention of `rows` and `cols`; indices are
/// normalised to 0-based while they are placed.
pub fn build_csc(
    vertex_count: usize,
    rows: &[VertexId],
    cols: &[VertexId],
    base: IndexBase,
) -> KernelResult<CscAdjacency> {
    if rows.len() != cols.len() {
        return Err(KernelError::DimensionMismatch(format!(
            "{} row indices but {} column indices",
            rows.len(),
            cols.len()
        )));
    }
    if vertex_count > MAX_VERTICES {
        return Err(KernelError::DimensionMismatch(format!(
            "{} vertices exceed the supported maximum of {}",
            vertex_count, MAX_VERTICES
        )));
    }

    let off = base.offset();
    let normalise = |raw: VertexId| -> KernelResult<usize> {
        raw.checked_sub(off)
            .map(|x| x as usize)
            .filter(|&x| x < vertex_count)
            .ok_or(KernelError::InvalidIndex {
                index: raw as u64,
                vertex_count,
            })
    };

    let nnz = rows.len();

    // Column sizes
    let mut offsets = vec![0usize; vertex_count + 1];
    for &c in cols {
        offsets[normalise(c)?] += 1;
    }

    // Exclusive prefix sum; offsets[n] = nnz
    let mut cumsum = 0;
    for slot in offsets.iter_mut().take(vertex_count) {
        let size = *slot;
        *slot = cumsum;
        cumsum += size;
    }
    offsets[vertex_count] = nnz;

    // Place row indices through a cursor copied from the final offsets
    let mut write_cursor = offsets[..vertex_count].to_vec();
    let mut neighbors: Vec<VertexId> = vec![0; nnz];
    for (&r, &c) in rows.iter().zip(cols.iter()) {
        let row = normalise(r)?;
        let col = normalise(c)?;
        let dst = write_cursor[col];
        neighbors[dst] = row as VertexId;
        write_cursor[col] += 1;
    }

    debug!(
        "Built CSC with {} vertices and {} arcs",
        vertex_count,
        neighbors.len()
    );

    Ok(CscAdjacency::from_parts_unchecked(offsets, neighbors))
}

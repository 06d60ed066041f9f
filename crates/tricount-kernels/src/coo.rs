//! Coordinate (COO) edge lists
//!
//! Edge lists arrive as parallel row/column arrays, either 0-based or 1-based
//! (Matrix Market files are 1-based). Indices are validated against the declared
//! vertex count here, so everything downstream can rely on in-range endpoints.

use crate::common::VertexId;
use crate::error::{KernelError, KernelResult};

/// Largest vertex count accepted for an edge list.
///
/// The compressed offsets alone take `8 * (MAX_VERTICES + 1)` bytes (2 GiB).
pub const MAX_VERTICES: usize = 1 << 28;

/// Index convention of an edge list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IndexBase {
    /// Indices start at 0
    #[default]
    Zero,
    /// Indices start at 1
    One,
}

impl IndexBase {
    /// Amount subtracted from every raw index during normalisation
    pub fn offset(self) -> VertexId {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

/// A validated edge list in coordinate form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooEdges {
    vertex_count: usize,
    rows: Vec<VertexId>,
    cols: Vec<VertexId>,
    base: IndexBase,
}

impl CooEdges {
    /// Build from parallel arrays.
    ///
    /// Fails with `DimensionMismatch` when the arrays disagree with each other or with
    /// `declared_nnz` or when `vertex_count` exceeds `MAX_VERTICES`, and with `InvalidIndex` when an index falls outside
    /// `[base, vertex_count + base)`.
    pub fn new(
        vertex_count: usize,
        declared_nnz: usize,
        rows: Vec<VertexId>,
        cols: Vec<VertexId>,
        base: IndexBase,
    ) -> KernelResult<Self> {
        if rows.len() != cols.len() {
            return Err(KernelError::DimensionMismatch(format!(
                "{} row indices but {} column indices",
                rows.len(),
                cols.len()
            )));
        }
        if rows.len() != declared_nnz {
            return Err(KernelError::DimensionMismatch(format!(
                "declared {} entries but found {}",
                declared_nnz,
                rows.len()
            )));
        }
        if vertex_count > MAX_VERTICES {
            return Err(KernelError::DimensionMismatch(format!(
                "{} vertices exceed the supported maximum of {}",
                vertex_count, MAX_VERTICES
            )));
        }

        let lo = base.offset() as u64;
        let hi = vertex_count as u64 + lo;
        if let Some(&bad) = rows
            .iter()
            .chain(cols.iter())
            .find(|&&x| (x as u64) < lo || (x as u64) >= hi)
        {
            return Err(KernelError::InvalidIndex {
                index: bad as u64,
                vertex_count,
            });
        }

        Ok(Self {
            vertex_count,
            rows,
            cols,
            base,
        })
    }

    /// Crate-internal constructor for 0-based arrays that are in range by construction
    pub(crate) fn from_zero_based_unchecked(
        vertex_count: usize,
        rows: Vec<VertexId>,
        cols: Vec<VertexId>,
    ) -> Self {
        debug_assert_eq!(rows.len(), cols.len());
        debug_assert!(rows.iter().chain(cols.iter()).all(|&x| (x as usize) < vertex_count));
        Self {
            vertex_count,
            rows,
            cols,
            base: IndexBase::Zero,
        }
    }

    /// Build from `(row, col)` pairs
    pub fn from_pairs(
        vertex_count: usize,
        pairs: &[(VertexId, VertexId)],
        base: IndexBase,
    ) -> KernelResult<Self> {
        let (rows, cols): (Vec<_>, Vec<_>) = pairs.iter().copied().unzip();
        Self::new(vertex_count, pairs.len(), rows, cols, base)
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    /// Index convention of the raw arrays
    pub fn base(&self) -> IndexBase {
        self.base
    }

    /// Raw row indices (in the list's own base)
    pub fn rows(&self) -> &[VertexId] {
        &self.rows
    }

    /// Raw column indices (in the list's own base)
    pub fn cols(&self) -> &[VertexId] {
        &self.cols
    }

    /// Iterate over entries normalised to 0-based `(row, col)`
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let off = self.base.offset();
        self.rows
            .iter()
            .zip(self.cols.iter())
            .map(move |(&r, &c)| (r - off, c - off))
    }

    /// Add the reverse of every arc and drop self-loops.
    ///
    /// The result keeps this list's index base. Duplicates (including the ones
    /// produced when the input already lists both directions) are left for the
    /// de-duplication pass after sorting.
    pub fn symmetrize(&self) -> CooEdges {
        let mut rows = Vec::with_capacity(2 * self.rows.len());
        let mut cols = Vec::with_capacity(2 * self.rows.len());

        for (&r, &c) in self.rows.iter().zip(self.cols.iter()) {
            if r == c {
                continue;
            }
            rows.push(r);
            cols.push(c);
        }
        let forward = rows.len();
        for i in 0..forward {
            rows.push(cols[i]);
            cols.push(rows[i]);
        }

        CooEdges {
            vertex_count: self.vertex_count,
            rows,
            cols,
            base: self.base,
        }
    }
}

//! Counting pipeline
//!
//! Edge list in, `Report` out: symmetrise and compress the edges, sort and
//! de-duplicate neighbor lists, count, and optionally cross-check against the
//! dense reference.

use crate::config::RunConfig;
use crate::error::{TricountError, TricountResult};
use crate::mtx::{self, MatrixMarket};
use crate::report::{GraphSummary, Report};
use crate::timing::{Elapsed, Stopwatch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing::{debug, info, warn};
use tricount_kernels::generators::random_graph;
use tricount_kernels::{
    count_triangles, symmetric_adjacency, CooEdges, CscAdjacency, DenseAdjacency,
    TriangleCounts, MAX_DENSE_VERTICES,
};

/// Largest graph `run_random` will generate
pub const MAX_RANDOM_VERTICES: usize = MAX_DENSE_VERTICES;

/// Drives one configured run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> TricountResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Read a Matrix Market file using the configured index base
    pub fn load(&self, path: &Path) -> TricountResult<MatrixMarket> {
        mtx::read_path(path, self.config.index_base)
    }

    /// Build the sorted, de-duplicated symmetric adjacency
    pub fn prepare(&self, edges: &CooEdges) -> TricountResult<(CscAdjacency, Elapsed)> {
        let watch = Stopwatch::start();
        let csc = symmetric_adjacency(edges)?;
        let elapsed = watch.stop()?;
        debug!("Adjacency built in {}", elapsed);
        Ok((csc, elapsed))
    }

    /// Count triangles on a prepared adjacency
    pub fn count(&self, csc: &CscAdjacency) -> TricountResult<(TriangleCounts, Elapsed)> {
        let watch = Stopwatch::start();
        let counts = count_triangles(csc, &self.config.count_options())?;
        let elapsed = watch.stop()?;
        Ok((counts, elapsed))
    }

    /// Compare sparse counts against the dense brute-force reference
    pub fn verify(&self, edges: &CooEdges, counts: &TriangleCounts) -> TricountResult<()> {
        let dense = DenseAdjacency::from_coo(edges)?;
        let expected = dense.brute_force_counts();
        let dense_total = expected.iter().sum::<u64>() / 3;

        if dense_total != counts.total() || expected.as_slice() != counts.per_vertex() {
            warn!(
                "Dense reference disagrees: sparse {} vs dense {}",
                counts.total(),
                dense_total
            );
            return Err(TricountError::VerificationFailed {
                sparse: counts.total(),
                dense: dense_total,
            });
        }
        debug!("Dense reference agrees: {} triangles", dense_total);
        Ok(())
    }

    /// Full run over an in-memory edge list
    pub fn run_edges(&self, source: &str, edges: &CooEdges) -> TricountResult<Report> {
        let (csc, build_elapsed) = self.prepare(edges)?;
        let (counts, elapsed) = self.count(&csc)?;

        let verified = if self.config.can_verify(edges.vertex_count()) {
            self.verify(edges, &counts)?;
            Some(true)
        } else {
            if self.config.verify {
                warn!(
                    "Skipping dense verification: {} vertices exceed the limit of {}",
                    edges.vertex_count(),
                    MAX_DENSE_VERTICES
                );
            }
            None
        };

        info!(
            "{}: {} triangles ({} strategy, {})",
            source,
            counts.total(),
            counts.strategy(),
            elapsed
        );

        let triangles = counts.total();
        let strategy = counts.strategy();
        Ok(Report {
            source: source.to_string(),
            vertices: csc.vertex_count(),
            edges: csc.edge_count(),
            arcs: csc.arc_count(),
            strategy,
            threads: self.config.threads,
            triangles,
            per_vertex: self.config.per_vertex.then(|| counts.into_per_vertex()),
            elapsed,
            build_elapsed,
            verified,
        })
    }

    /// Load a file and count it
    pub fn run_file(&self, path: &Path) -> TricountResult<Report> {
        let matrix = self.load(path)?;
        self.run_edges(&path.display().to_string(), &matrix.edges)
    }

    /// Load a file and describe its structure without counting
    pub fn inspect(&self, path: &Path) -> TricountResult<GraphSummary> {
        let matrix = self.load(path)?;
        let (csc, _) = self.prepare(&matrix.edges)?;
        Ok(GraphSummary::new(
            &path.display().to_string(),
            Some(matrix.header),
            &matrix.edges,
            &csc,
        ))
    }

    /// Generate a random graph on `n` vertices, returning a description and its edges
    pub fn generate(&self, n: usize) -> TricountResult<(String, CooEdges)> {
        if n == 0 || n > MAX_RANDOM_VERTICES {
            return Err(TricountError::InvalidArgument(format!(
                "vertex count must be within 1..={}, got {}",
                MAX_RANDOM_VERTICES, n
            )));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let edges = random_graph(n, self.config.probability, &mut rng);
        info!(
            "Generated random graph: {} vertices, {} edges (p = {})",
            n,
            edges.nnz(),
            self.config.probability
        );

        let source = match self.config.seed {
            Some(seed) => format!("random(n={}, p={}, seed={})", n, self.config.probability, seed),
            None => format!("random(n={}, p={})", n, self.config.probability),
        };
        Ok((source, edges))
    }

    /// Generate a random graph on `n` vertices and count it
    pub fn run_random(&self, n: usize) -> TricountResult<Report> {
        let (source, edges) = self.generate(n)?;
        self.run_edges(&source, &edges)
    }
}

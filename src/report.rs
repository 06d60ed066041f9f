//! Run report and graph summaries

use crate::error::TricountResult;
use crate::mtx::MatrixHeader;
use crate::timing::Elapsed;
use serde::{Deserialize, Serialize};
use std::fmt;
use tricount_kernels::{CooEdges, CscAdjacency, Strategy};

/// Outcome of one counting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// File path or generator description
    pub source: String,
    pub vertices: usize,
    /// Undirected edges after symmetrisation and de-duplication
    pub edges: usize,
    /// Stored arcs (twice the edge count)
    pub arcs: usize,
    pub strategy: Strategy,
    /// Requested workers (0 = global pool)
    pub threads: usize,
    /// Distinct triangles
    pub triangles: u64,
    /// Triangles each vertex belongs to, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_vertex: Option<Vec<u64>>,
    /// Counting time
    pub elapsed: Elapsed,
    /// Adjacency construction time (conversion, sort, de-duplication)
    pub build_elapsed: Elapsed,
    /// Dense cross-check outcome, when one ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Report {
    pub fn to_json(&self) -> TricountResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> TricountResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Scalar fields as `(name, value)` pairs, in display order
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("source", self.source.clone()),
            ("vertices", self.vertices.to_string()),
            ("edges", self.edges.to_string()),
            ("arcs", self.arcs.to_string()),
            ("strategy", self.strategy.to_string()),
            ("threads", self.threads.to_string()),
            ("triangles", self.triangles.to_string()),
            ("build_time", self.build_elapsed.to_string()),
            ("count_time", self.elapsed.to_string()),
        ];
        if let Some(ok) = self.verified {
            rows.push(("verified", ok.to_string()));
        }
        rows
    }

    /// Vertices that belong to at least one triangle, as `(vertex, count)`
    pub fn nonzero_vertices(&self) -> Vec<(usize, u64)> {
        self.per_vertex
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| (v, c))
            .collect()
    }
}

/// Structural statistics of a loaded graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<MatrixHeader>,
    pub vertices: usize,
    /// Entries as stored in the input
    pub entries: usize,
    /// Diagonal entries dropped during symmetrisation
    pub self_loops: usize,
    pub edges: usize,
    pub arcs: usize,
    pub max_degree: usize,
    pub mean_degree: f64,
    pub isolated_vertices: usize,
    /// Estimated bytes held by the compressed adjacency
    pub memory_bytes: usize,
}

impl GraphSummary {
    pub fn new(
        source: &str,
        header: Option<MatrixHeader>,
        edges: &CooEdges,
        csc: &CscAdjacency,
    ) -> Self {
        let n = csc.vertex_count();
        let mean_degree = if n == 0 {
            0.0
        } else {
            csc.arc_count() as f64 / n as f64
        };
        Self {
            source: source.to_string(),
            header,
            vertices: n,
            entries: edges.nnz(),
            self_loops: edges.iter().filter(|(r, c)| r == c).count(),
            edges: csc.edge_count(),
            arcs: csc.arc_count(),
            max_degree: csc.max_degree(),
            mean_degree,
            isolated_vertices: (0..n).filter(|&v| csc.degree(v) == 0).count(),
            memory_bytes: csc.memory_usage(),
        }
    }

    pub fn to_json(&self) -> TricountResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fields as `(name, value)` pairs, in display order
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("source", self.source.clone())];
        if let Some(header) = &self.header {
            rows.push(("type", format!("{} [{}]", header.description(), header.type_code())));
        }
        rows.extend([
            ("vertices", self.vertices.to_string()),
            ("entries", self.entries.to_string()),
            ("self_loops", self.self_loops.to_string()),
            ("edges", self.edges.to_string()),
            ("arcs", self.arcs.to_string()),
            ("max_degree", self.max_degree.to_string()),
            ("mean_degree", format!("{:.3}", self.mean_degree)),
            ("isolated_vertices", self.isolated_vertices.to_string()),
            ("memory_bytes", self.memory_bytes.to_string()),
        ]);
        rows
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total triangles: {}", self.triangles)?;
        write!(f, "Counting took {}", self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            source: "square.mtx".to_string(),
            vertices: 4,
            edges: 5,
            arcs: 10,
            strategy: Strategy::EdgeMerge,
            threads: 2,
            triangles: 2,
            per_vertex: Some(vec![2, 1, 2, 0]),
            elapsed: Elapsed { secs: 0, nanos: 1200 },
            build_elapsed: Elapsed { secs: 0, nanos: 800 },
            verified: None,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"strategy\": \"edge-merge\""));
        assert!(!json.contains("verified"));
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }

    #[test]
    fn test_summary_rows() {
        let mut report = sample();
        let rows = report.summary_rows();
        assert_eq!(rows[0], ("source", "square.mtx".to_string()));
        assert_eq!(rows.len(), 9);

        report.verified = Some(true);
        assert_eq!(report.summary_rows().last(), Some(&("verified", "true".to_string())));
    }

    #[test]
    fn test_nonzero_vertices() {
        assert_eq!(sample().nonzero_vertices(), vec![(0, 2), (1, 1), (2, 2)]);
        let report = Report { per_vertex: None, ..sample() };
        assert!(report.nonzero_vertices().is_empty());
    }

    #[test]
    fn test_graph_summary() {
        use tricount_kernels::{symmetric_adjacency, IndexBase};

        // Star on 0 plus a self-loop and an isolated vertex 5
        let edges = CooEdges::from_pairs(
            6,
            &[(0, 1), (0, 2), (0, 3), (2, 0), (4, 4)],
            IndexBase::Zero,
        )
        .unwrap();
        let csc = symmetric_adjacency(&edges).unwrap();
        let summary = GraphSummary::new("star", None, &edges, &csc);

        assert_eq!(summary.entries, 5);
        assert_eq!(summary.self_loops, 1);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.arcs, 6);
        assert_eq!(summary.max_degree, 3);
        assert_eq!(summary.isolated_vertices, 2);
        assert!((summary.mean_degree - 1.0).abs() < 1e-12);
        assert_eq!(summary.summary_rows().len(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "Total triangles: 2\nCounting took 0 seconds and 1200 nanoseconds"
        );
    }
}

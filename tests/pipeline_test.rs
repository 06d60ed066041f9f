//! End-to-end tests: Matrix Market files on disk through the full pipeline

use flate2::write::GzEncoder;
use flate2::Compression;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tricount::kernels::generators::{complete_graph, random_graph};
use tricount::kernels::DenseAdjacency;
use tricount::*;

const SQUARE_WITH_DIAGONAL: &str = "%%MatrixMarket matrix coordinate pattern symmetric\n\
% 4-cycle 1-2-3-4 plus chord 1-3\n\
4 4 5\n\
2 1\n\
3 2\n\
4 3\n\
4 1\n\
3 1\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_gz(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn run(path: &Path, strategy: Strategy) -> Report {
    let config = RunConfig {
        strategy,
        per_vertex: true,
        threads: 4,
        ..Default::default()
    };
    Pipeline::new(config).unwrap().run_file(path).unwrap()
}

#[test]
fn test_square_with_diagonal_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "square.mtx", SQUARE_WITH_DIAGONAL);

    for strategy in Strategy::ALL {
        let report = run(&path, strategy);
        assert_eq!(report.vertices, 4);
        assert_eq!(report.edges, 5);
        assert_eq!(report.triangles, 2);
        assert_eq!(report.per_vertex.as_deref(), Some(&[2, 1, 2, 1][..]));
    }
}

#[test]
fn test_gzip_input_matches_plain() {
    let dir = TempDir::new().unwrap();
    let plain = write_file(&dir, "square.mtx", SQUARE_WITH_DIAGONAL);
    let gz = write_gz(&dir, "square.mtx.gz", SQUARE_WITH_DIAGONAL);

    let a = run(&plain, Strategy::EdgeMerge);
    let b = run(&gz, Strategy::EdgeMerge);
    assert_eq!(a.triangles, b.triangles);
    assert_eq!(a.per_vertex, b.per_vertex);
}

#[test]
fn test_general_file_listing_both_directions() {
    // Same graph stored as a general matrix with both arcs, a weight column and a self-loop
    let dir = TempDir::new().unwrap();
    let contents = "%%MatrixMarket matrix coordinate real general\n\
4 4 11\n\
1 2 1.0\n2 1 1.0\n2 3 0.5\n3 2 0.5\n3 4 2\n4 3 2\n\
4 1 1\n1 4 1\n1 3 3\n3 1 3\n2 2 9\n";
    let path = write_file(&dir, "square_general.mtx", contents);

    let report = run(&path, Strategy::Ordered);
    assert_eq!(report.edges, 5);
    assert_eq!(report.triangles, 2);
    assert_eq!(report.per_vertex, Some(vec![2, 1, 2, 1]));
}

#[test]
fn test_written_random_graph_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("random.mtx");

    let edges = random_graph(200, 0.1, &mut StdRng::seed_from_u64(21));
    let file = std::fs::File::create(&path).unwrap();
    mtx::write_pattern(&edges, file).unwrap();

    let expected = DenseAdjacency::from_coo(&edges).unwrap().brute_force_total();
    for strategy in Strategy::ALL {
        assert_eq!(run(&path, strategy).triangles, expected);
    }
}

#[test]
fn test_complete_graph_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("k12.mtx.gz");
    let file = std::fs::File::create(&path).unwrap();
    let encoder = GzEncoder::new(file, Compression::fast());
    mtx::write_pattern(&complete_graph(12), encoder).unwrap();

    let report = run(&path, Strategy::MaskedProduct);
    assert_eq!(report.triangles, 220);
    assert!(report.per_vertex.unwrap().iter().all(|&c| c == 55));
}

#[test]
fn test_zero_based_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "triangle0.mtx",
        "%%MatrixMarket matrix coordinate pattern general\n3 3 3\n0 1\n1 2\n2 0\n",
    );

    let one_based = Pipeline::new(RunConfig::default()).unwrap();
    assert!(matches!(
        one_based.run_file(&path),
        Err(TricountError::InvalidIndex { index: 0, vertex_count: 3 })
    ));

    let zero_based = Pipeline::new(RunConfig {
        index_base: IndexBase::Zero,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(zero_based.run_file(&path).unwrap().triangles, 1);
}

#[test]
fn test_rejected_files() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(RunConfig::default()).unwrap();

    let path = write_file(
        &dir,
        "hermitian.mtx",
        "%%MatrixMarket matrix coordinate complex hermitian\n2 2 1\n2 1 1.0 0.5\n",
    );
    assert!(matches!(pipeline.run_file(&path), Err(TricountError::UnsupportedFormat(_))));

    let path = write_file(&dir, "dense.mtx", "%%MatrixMarket matrix array real general\n2 2\n1\n0\n0\n1\n");
    assert!(matches!(pipeline.run_file(&path), Err(TricountError::UnsupportedFormat(_))));

    let path = write_file(
        &dir,
        "rect.mtx",
        "%%MatrixMarket matrix coordinate pattern general\n2 3 1\n1 2\n",
    );
    assert!(matches!(pipeline.run_file(&path), Err(TricountError::DimensionMismatch(_))));

    let path = write_file(
        &dir,
        "short.mtx",
        "%%MatrixMarket matrix coordinate pattern general\n3 3 4\n1 2\n2 3\n",
    );
    assert!(matches!(pipeline.run_file(&path), Err(TricountError::DimensionMismatch(_))));

    let missing = dir.path().join("missing.mtx");
    assert!(matches!(pipeline.run_file(&missing), Err(TricountError::Io(_))));
}

#[test]
fn test_inspect() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "square.mtx.gz", SQUARE_WITH_DIAGONAL);

    let summary = Pipeline::new(RunConfig::default()).unwrap().inspect(&path).unwrap();
    let header = summary.header.as_ref().unwrap();
    assert_eq!(header.type_code(), "MCPS");
    assert_eq!(header.nnz, 5);
    assert_eq!(summary.vertices, 4);
    assert_eq!(summary.edges, 5);
    assert_eq!(summary.max_degree, 3);
    assert_eq!(summary.isolated_vertices, 0);

    let json = summary.to_json().unwrap();
    assert!(json.contains("\"symmetry\": \"symmetric\""));
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(&dir, "run.yaml", "strategy: ordered\nthreads: 2\nper_vertex: true\nverify: true\n");
    let graph = write_file(&dir, "square.mtx", SQUARE_WITH_DIAGONAL);

    let config = RunConfig::load(&config_path).unwrap();
    let report = Pipeline::new(config).unwrap().run_file(&graph).unwrap();
    assert_eq!(report.strategy, Strategy::Ordered);
    assert_eq!(report.threads, 2);
    assert_eq!(report.verified, Some(true));

    let json = report.to_json().unwrap();
    assert_eq!(Report::from_json(&json).unwrap(), report);
}

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tricount::kernels::generators::random_sparse_graph;
use tricount::kernels::{
    count_triangles, coo_to_csc, par_sort_neighbors, symmetric_adjacency, CountOptions,
};
use tricount::{CooEdges, Strategy};

/// Sparse random graph with mean degree around 16
fn sparse_graph(n: usize) -> CooEdges {
    random_sparse_graph(n, 8 * n, &mut StdRng::seed_from_u64(42))
}

/// Benchmark COO to CSC conversion and neighbor sorting
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_adjacency");

    for size in [1_000, 10_000, 50_000].iter() {
        let sym = sparse_graph(*size).symmetrize();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut csc = coo_to_csc(&sym).unwrap();
                par_sort_neighbors(&mut csc);
                criterion::black_box(csc.arc_count());
            });
        });
    }
    group.finish();
}

/// Benchmark each counting strategy on the same graph
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_strategy");
    group.sample_size(20);

    let csc = symmetric_adjacency(&sparse_graph(2_000)).unwrap();
    for strategy in Strategy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(strategy), &strategy, |b, &strategy| {
            let options = CountOptions::new(strategy, 0);
            b.iter(|| {
                let counts = count_triangles(&csc, &options).unwrap();
                criterion::black_box(counts.total());
            });
        });
    }
    group.finish();
}

/// Benchmark edge-merge scaling with worker count
fn bench_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_merge_threads");

    let csc = symmetric_adjacency(&sparse_graph(50_000)).unwrap();
    for threads in [1, 2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, &threads| {
            let options = CountOptions::new(Strategy::EdgeMerge, threads);
            b.iter(|| {
                let counts = count_triangles(&csc, &options).unwrap();
                criterion::black_box(counts.total());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_strategies, bench_threads);
criterion_main!(benches);

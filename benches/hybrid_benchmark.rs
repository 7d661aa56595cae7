use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hybridswarm::{
    algorithms::{genetic::SelectionMethod, particles::SwarmTopology, Hybrid},
    core::{FunctionKind, HybridConfig},
};

fn config(function: FunctionKind, topology: SwarmTopology, dimension: usize) -> HybridConfig {
    let mut config = HybridConfig::new(0.25, 0.05, 1.0);
    config
        .with_function(function)
        .with_dimension(dimension)
        .with_n_particles(16)
        .with_max_iterations(100)
        .with_topology(topology)
        .with_seed(0);
    config
}

fn function_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hybrid (von Neumann)");
    for function in FunctionKind::ALL {
        for dimension in [2, 10, 30] {
            group.bench_with_input(
                BenchmarkId::new(function.to_string(), dimension),
                &dimension,
                |b, ndim| {
                    let base_cfg = config(function, SwarmTopology::von_neumann(), *ndim);
                    b.iter_batched(
                        || Hybrid::new(base_cfg.clone()).unwrap(),
                        |mut solver| {
                            let result = solver.run().unwrap();
                            black_box(result);
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn topology_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hybrid (Rastrigin, D = 10)");
    for topology in [
        SwarmTopology::Global,
        SwarmTopology::random(),
        SwarmTopology::ring(),
        SwarmTopology::von_neumann(),
    ] {
        for selection in [SelectionMethod::None, SelectionMethod::Tournament] {
            group.bench_with_input(
                BenchmarkId::new(topology.to_string(), selection),
                &selection,
                |b, selection| {
                    let mut base_cfg = config(FunctionKind::Rastrigin, topology, 10);
                    base_cfg.with_selection(*selection);
                    b.iter_batched(
                        || Hybrid::new(base_cfg.clone()).unwrap(),
                        |mut solver| {
                            let result = solver.run().unwrap();
                            black_box(result);
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, function_benchmark, topology_benchmark);
criterion_main!(benches);

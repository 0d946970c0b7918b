//! Criterion benchmarks for the knapsack GA.
//!
//! Uses a synthetic catalog so timings measure the algorithm alone.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knapsack_ga::ga::{EvolutionEngine, FeasibilityPolicy, GenerationDriver, KnapsackConfig};
use knapsack_ga::random::create_rng;
use knapsack_ga::Catalog;

fn synthetic_catalog(n: usize) -> Catalog {
    let pairs: Vec<(u64, u64)> = (0..n as u64)
        .map(|i| (1 + (i * 37) % 50, 1 + (i * 61) % 90))
        .collect();
    Catalog::from_pairs(&pairs).expect("non-empty catalog")
}

fn config(n_items: usize, policy: FeasibilityPolicy) -> KnapsackConfig {
    KnapsackConfig::default()
        .with_capacity(n_items as u64 * 8)
        .with_population_size(50)
        .with_max_generations(100)
        .with_policy(policy)
        .with_seed(42)
}

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");
    for &n in &[20usize, 100, 500] {
        let catalog = synthetic_catalog(n);
        for policy in [FeasibilityPolicy::Repair, FeasibilityPolicy::Penalty] {
            let engine = EvolutionEngine::new(&catalog, config(n, policy)).expect("valid config");
            let mut rng = create_rng(42);
            let parent = engine.seed(&mut rng);
            group.bench_with_input(BenchmarkId::new(policy.to_string(), n), &n, |b, _| {
                b.iter(|| black_box(engine.evolve(&parent, &mut rng).expect("evolve")))
            });
        }
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let catalog = synthetic_catalog(100);
    c.bench_function("run_100_generations", |b| {
        b.iter(|| {
            let mut driver =
                GenerationDriver::new(&catalog, config(100, FeasibilityPolicy::Repair)).expect("driver");
            black_box(driver.run().expect("run"))
        })
    });
}

criterion_group!(benches, bench_evolve, bench_run);
criterion_main!(benches);

//! Criterion benchmarks for the decay simulator.
//!
//! Benchmarks:
//! 1. Full simulation per engine (10 000 days)
//! 2. Summary analysis over a finished run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use decaylab_core::{simulate, RngEngine, ScenarioPreset, SimulationConfig, Summary};

fn long_config(engine: RngEngine) -> SimulationConfig {
    SimulationConfig {
        days: 10_000,
        engine,
        ..ScenarioPreset::Mixed.to_config()
    }
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_10k_days");
    for engine in RngEngine::ALL {
        let config = long_config(engine);
        group.bench_with_input(BenchmarkId::from_parameter(engine), &config, |b, cfg| {
            b.iter(|| simulate(black_box(cfg)))
        });
    }
    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let run = match simulate(&long_config(RngEngine::Mt19937)) {
        Ok(run) => run,
        Err(err) => panic!("benchmark config rejected: {err}"),
    };
    c.bench_function("summary_10k_days", |b| {
        b.iter(|| Summary::compute(black_box(&run)))
    });
}

criterion_group!(benches, bench_simulate, bench_summary);
criterion_main!(benches);

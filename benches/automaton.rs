//! Benchmarks for the Game of Life step and the per-individual evaluation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use life_breeder::{
    Automaton, Individual,
    compute::evolution::StopCondition,
    schema::ScoringConfig,
};

fn bench_automaton_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_step");

    for size in [32, 64, 128, 256] {
        for wrap in [false, true] {
            let mut rng = StdRng::seed_from_u64(42);
            let mut automaton = Automaton::new(size, size, wrap).unwrap();
            automaton.random_fill(30.0, &mut rng);

            let label = format!("{}x{}{}", size, size, if wrap { "_wrap" } else { "" });
            group.bench_with_input(BenchmarkId::from_parameter(label), &size, |b, _| {
                b.iter(|| {
                    black_box(&mut automaton).step(1);
                });
            });
        }
    }

    group.finish();
}

fn bench_simulate_until_periodic(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_until_periodic");
    group.sample_size(20);

    for seed_size in [4, 8] {
        let mut individual = Individual::seeded(40, 40, seed_size, seed_size, false, 7).unwrap();
        individual.random_fill_seed(30.0);
        let offset = (40 - seed_size) / 2;

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("seed_{}x{}", seed_size, seed_size)),
            &seed_size,
            |b, _| {
                b.iter(|| {
                    individual
                        .init_run(offset, offset, ScoringConfig::default())
                        .unwrap();
                    black_box(individual.simulate(StopCondition::Periodic, Some(5_000)))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_automaton_step, bench_simulate_until_periodic);
criterion_main!(benches);

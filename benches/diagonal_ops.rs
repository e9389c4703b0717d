use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chain_dp::{
    problems::matrix_chain::MatrixChainProblem, IntervalEngineBuilder, IntervalProblem,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_problem(rng: &mut StdRng, n: usize) -> MatrixChainProblem {
    let dims = (0..=n).map(|_| rng.gen_range(1..=500)).collect();
    MatrixChainProblem::from_dims(dims).expect("n >= 1")
}

fn bench_split_cost(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5155AA55);
    let problem = random_problem(&mut rng, 512);

    let mut group = c.benchmark_group("matrix_chain_split_cost");
    group.bench_function("checked_candidate", |b| {
        b.iter(|| {
            let cost = problem.split_cost(
                black_box(10),
                black_box(200),
                black_box(400),
                black_box(1_000_000),
                black_box(2_000_000),
            );
            black_box(cost);
        });
    });
    group.finish();
}

fn bench_schedules(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let problem = random_problem(&mut rng, 192);

    let mut group = c.benchmark_group("matrix_chain_schedule");
    group.sample_size(10);
    group.bench_function("serial", |b| {
        b.iter(|| {
            let engine = IntervalEngineBuilder::new(problem.clone()).serial().build();
            black_box(engine.run().expect("valid chain").optimal_cost());
        });
    });
    group.bench_function("eager_parallel", |b| {
        b.iter(|| {
            let engine = IntervalEngineBuilder::new(problem.clone())
                .with_parallel_min_width(1)
                .build();
            black_box(engine.run().expect("valid chain").optimal_cost());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_split_cost, bench_schedules);
criterion_main!(benches);

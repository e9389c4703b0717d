use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use chain_dp::ChainOptimizer;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_dims(rng: &mut StdRng, n: usize) -> Vec<usize> {
    (0..=n).map(|_| rng.gen_range(1..=200)).collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_chain_perf(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_chain_optimize");
    group.sample_size(10);
    for &n in &[64usize, 128, 256] {
        group.bench_function(format!("chain_len_{n}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    random_dims(&mut rng, n)
                },
                |dims| {
                    let before = rss_kib();
                    let solution = ChainOptimizer::new()
                        .optimize_dims(&dims)
                        .expect("random dims are valid");
                    let after = rss_kib();
                    criterion::black_box(solution.optimal_cost());
                    // record memory delta to stderr to avoid criterion noise
                    eprintln!(
                        "RSS KiB delta (chain {n}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain_perf);
criterion_main!(benches);

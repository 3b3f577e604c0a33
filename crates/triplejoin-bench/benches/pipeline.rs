//! End-to-end pipeline benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use triplejoin_bench::{BenchContext, Scale};
use triplejoin_core::{JoinAlgorithm, JoinConfig};

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    let configs = [
        ("hash", JoinConfig::new(JoinAlgorithm::Hash)),
        ("sort_merge", JoinConfig::new(JoinAlgorithm::SortMerge)),
        (
            "sort_merge_parallel",
            JoinConfig::new(JoinAlgorithm::SortMerge).with_parallel_sort(true),
        ),
    ];

    for scale in [Scale::Small, Scale::Medium] {
        let ctx = BenchContext::with_scale(scale);
        for (name, config) in &configs {
            group.bench_with_input(BenchmarkId::new(*name, scale.users()), config, |b, config| {
                b.iter(|| black_box(ctx.run_pipeline(config)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);

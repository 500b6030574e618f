//! Benchmarks for metric synthesis and frame recomposition.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opsdeck_lib::core::types::SampleFreq;
use opsdeck_lib::core::Config;
use opsdeck_lib::dashboard::Dashboard;
use opsdeck_lib::synth::generators;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generators(c: &mut Criterion) {
    let ending_at = Utc.with_ymd_and_hms(2024, 12, 29, 18, 0, 0).unwrap();

    c.bench_function("performance_series_30", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            generators::performance_series(
                black_box(30),
                SampleFreq::Hourly,
                ending_at,
                &mut rng,
            )
            .unwrap()
        })
    });

    c.bench_function("drift_distribution_50", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| generators::drift_distribution(black_box(50), (-5.0, 5.0), &mut rng).unwrap())
    });

    c.bench_function("topology_points_20", |b| {
        b.iter(|| generators::topology_points(black_box(42), 20).unwrap())
    });
}

fn bench_recompute(c: &mut Criterion) {
    // Cold: every domain regenerates. Warm: all cache hits, the steady
    // state of the 30-second refresh loop.
    c.bench_function("recompute_cold", |b| {
        b.iter_with_setup(
            || Dashboard::new(Config::default()),
            |dashboard| black_box(dashboard.recompute()),
        )
    });

    c.bench_function("recompute_warm", |b| {
        let dashboard = Dashboard::new(Config::default());
        dashboard.recompute();
        b.iter(|| black_box(dashboard.recompute()))
    });
}

criterion_group!(benches, bench_generators, bench_recompute);
criterion_main!(benches);

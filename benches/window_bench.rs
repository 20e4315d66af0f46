use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use roda_window::{KeyedWindows, SlidingWindow, WindowOptions};
use std::hint::black_box;
use std::time::Duration;

const MS: u64 = 1_000_000;

fn bench_add_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_sample");
    group.throughput(Throughput::Elements(1));

    // Many samples per bucket: the walk stops at the first slot.
    group.bench_function("same_bucket", |b| {
        let mut window = SlidingWindow::new(Duration::from_secs(60), 60);
        let now = 1_000_000 * MS;
        b.iter(|| {
            window.add_sample(black_box(now), black_box(1.5));
        });
    });

    // One bucket forward per sample: one reset per call.
    group.bench_function("next_bucket", |b| {
        let mut window = SlidingWindow::new(Duration::from_secs(60), 60);
        let mut now = 1_000_000 * MS;
        b.iter(|| {
            now += 1_000 * MS;
            window.add_sample(black_box(now), black_box(1.5));
        });
    });

    group.finish();
}

fn bench_full_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_rotation");
    group.throughput(Throughput::Elements(1));

    for buckets in [10usize, 60, 600] {
        group.bench_with_input(BenchmarkId::from_parameter(buckets), &buckets, |b, &buckets| {
            let mut window = SlidingWindow::new(Duration::from_secs(60), buckets);
            let mut now = 1_000_000 * MS;
            b.iter(|| {
                // Jump past the whole window every call.
                now += 61_000 * MS;
                window.add_sample(black_box(now), black_box(2.0));
            });
        });
    }

    group.finish();
}

fn bench_accessors(c: &mut Criterion) {
    let mut group = c.benchmark_group("accessors");

    let mut window = SlidingWindow::new(Duration::from_secs(60), 60);
    for i in 0..60_000u64 {
        window.add_sample(1_000_000 * MS + i * MS, i as f64);
    }

    group.bench_function("average", |b| b.iter(|| black_box(window.average())));
    group.bench_function("min_max", |b| {
        b.iter(|| black_box((window.min(), window.max())))
    });
    group.bench_function("stats", |b| b.iter(|| black_box(window.stats())));

    group.finish();
}

fn bench_keyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_sample_1000_keys", |b| {
        let mut windows = KeyedWindows::new(WindowOptions::default()).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            windows.add_sample(black_box(i % 1000), 1_000_000 * MS + i * 10_000, 1.0);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add_sample,
    bench_full_rotation,
    bench_accessors,
    bench_keyed
);
criterion_main!(benches);

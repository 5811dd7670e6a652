use chained_collections::GrowVec;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn bench_push(c: &mut Criterion) {
    c.bench_function("grow_vec_push_10k", |b| {
        b.iter_batched(
            GrowVec::<u64>::new,
            |mut v| {
                for i in 0..10_000u64 {
                    v.push(i);
                }
                black_box(v)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get(c: &mut Criterion) {
    c.bench_function("grow_vec_get", |b| {
        let mut v = GrowVec::new();
        for i in 0..10_000u64 {
            v.push(i);
        }
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % 10_000;
            black_box(v.get(i).unwrap());
        })
    });
}

fn bench_remove_front(c: &mut Criterion) {
    c.bench_function("grow_vec_remove_front_1k", |b| {
        b.iter_batched(
            || {
                let mut v = GrowVec::new();
                for i in 0..1_000u64 {
                    v.push(i);
                }
                v
            },
            |mut v| {
                // Worst case: every removal shifts the whole tail.
                while !v.is_empty() {
                    black_box(v.remove(0).unwrap());
                }
                v
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_contains(c: &mut Criterion) {
    c.bench_function("grow_vec_contains_miss", |b| {
        let mut v = GrowVec::new();
        for i in 0..10_000u64 {
            v.push(i);
        }
        b.iter(|| black_box(v.contains(&u64::MAX)))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_push, bench_get, bench_remove_front, bench_contains
}
criterion_main!(benches);

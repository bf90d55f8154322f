//! Microbenchmarks for the shifting operations of the bounded store.
//!
//! Front inserts and front removes move every live record, so they bound
//! the cost of any positional operation.
//!
//! Run with: `cargo bench -p chiplist -- shift`

#![allow(missing_docs)]

use chiplist::record::Processor;
use chiplist::store::RecordStore;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn sample() -> Processor {
    Processor {
        name: "Ryzen 7 7700X".to_string(),
        cores: 8,
        threads: 16,
        node_nm: 5,
        base_clock_ghz: 4.5,
        boost_clock_ghz: 5.4,
        tdp_watts: 105,
        integrated_graphics: true,
    }
}

/// Builds a store of `capacity` slots holding `capacity - 1` records.
fn nearly_full(capacity: usize) -> RecordStore {
    let mut store = RecordStore::new(capacity).unwrap();
    for _ in 1..capacity {
        store.append(sample()).unwrap();
    }
    store
}

fn bench_insert_front_remove_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift/front");

    for capacity in [5usize, 64, 1024] {
        let mut store = nearly_full(capacity);
        let record = sample();

        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| {
                store.insert_front(black_box(record.clone())).unwrap();
                black_box(store.remove_at(1).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_append_remove_back(c: &mut Criterion) {
    let mut store = nearly_full(1024);
    let record = sample();

    c.bench_function("shift/back_1024", |b| {
        b.iter(|| {
            store.append(black_box(record.clone())).unwrap();
            black_box(store.remove_at(store.len()).unwrap());
        });
    });
}

fn bench_get_at(c: &mut Criterion) {
    let store = nearly_full(1024);

    c.bench_function("get_at/middle_1024", |b| {
        b.iter(|| black_box(store.get_at(black_box(512)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_insert_front_remove_front,
    bench_append_remove_back,
    bench_get_at
);
criterion_main!(benches);

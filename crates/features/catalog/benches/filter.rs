use castellan_catalog::{CatalogStore, FilterState, RevealController, Viewport, filter};
use castellan_kernel::prelude::CategorySet;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let store = CatalogStore::castle();

    let cases = [
        ("unrestricted", CategorySet::empty(), ""),
        ("categories", CategorySet::EVENTS | CategorySet::ACCOMMODATION, ""),
        ("query", CategorySet::empty(), "castle"),
        ("both", CategorySet::TOURS | CategorySet::SHOP, "CASTLE"),
    ];

    for (label, active, query) in cases {
        group.bench_with_input(BenchmarkId::new("filter", label), &(active, query), |b, (a, q)| {
            b.iter(|| filter(black_box(store.entries()), *a, q));
        });
    }

    let state = FilterState::new(CategorySet::empty(), "the");
    let reveal = RevealController::default();
    group.bench_function("browse_narrow", |b| {
        b.iter(|| store.browse(black_box(&state), &reveal, Viewport::Narrow).entries.len());
    });

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);

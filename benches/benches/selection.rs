// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_row_selection::RowSelection;

fn keys(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("key{i}")).collect()
}

fn bench_replace_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_selection/replace_with");

    // Models `set_selected_keys` from a host, with every key repeated twice.
    for len in [128_usize, 2_048, 32_768] {
        let unique = keys(len);
        let doubled: Vec<String> = unique.iter().chain(unique.iter()).cloned().collect();
        group.throughput(Throughput::Elements(doubled.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &doubled, |b, doubled| {
            b.iter_batched(
                || (RowSelection::<String>::new(), doubled.clone()),
                |(mut sel, keys)| {
                    sel.replace_with(keys);
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_selection/reconcile");

    // One window's worth of reconciliation, per mode.
    let window = keys(50);
    let mut explicit = RowSelection::new();
    explicit.replace_with(keys(10_000));
    let mut all = RowSelection::<String>::new();
    all.select_all();

    for (name, sel) in [("explicit", &explicit), ("all", &all)] {
        group.throughput(Throughput::Elements(window.len() as u64));
        group.bench_function(name, |b| {
            let mut flags = vec![false; window.len()];
            b.iter(|| {
                let mut changed = 0;
                for (key, flag) in window.iter().zip(flags.iter_mut()) {
                    *flag = !*flag;
                    changed += usize::from(sel.reconcile(key.as_str(), flag));
                }
                black_box(changed)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_replace_with, bench_reconcile);
criterion_main!(benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use std::time::Duration;
use understory_row_window::compute_row_window;
use understory_virtual_table::{
    ColumnDefinition, SourceRow, TableConfig, TypeAttribute, VirtualTable,
};

fn rows(len: usize) -> Vec<SourceRow> {
    (0..len)
        .map(|i| {
            json!({
                "id": format!("key{i}"),
                "name": format!("Task {i}"),
                "amount": (i % 10_000) as f64 / 100.0,
                "status": if i % 2 == 0 { "Active" } else { "Inactive" },
                "url": format!("https://example.com/task/{i}"),
            })
            .as_object()
            .cloned()
            .unwrap_or_default()
        })
        .collect()
}

fn columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("name", "Task Name"),
        ColumnDefinition::new("amount", "Budget")
            .with_type("currency")
            .with_attribute("currencyCode", TypeAttribute::literal("USD")),
        ColumnDefinition::new("status", "Status"),
        ColumnDefinition::new("url", "Link")
            .with_type("url")
            .with_attribute("label", TypeAttribute::field("name")),
    ]
}

fn table(len: usize) -> VirtualTable {
    let mut table = VirtualTable::new(TableConfig::default()).expect("default config is valid");
    table.set_columns(columns());
    table.set_dataset(rows(len));
    table
}

fn bench_window(c: &mut Criterion) {
    c.bench_function("row_window/compute", |b| {
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 137.0) % 4_000_000.0;
            black_box(compute_row_window(black_box(offset), 40.0, 400.0, 10, 100_000))
        });
    });
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_table/scroll");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    // Cold: every window materializes fresh rows. Warm: every row is cached.
    for len in [10_000_usize, 100_000] {
        let offsets: Vec<f64> = (0..200).map(|step| f64::from(step) * 2_000.0).collect();

        group.bench_with_input(BenchmarkId::new("cold", len), &offsets, |b, offsets| {
            b.iter_batched(
                || table(len),
                |mut table| {
                    for &offset in offsets {
                        table.set_scroll_offset(offset);
                    }
                    black_box(table.cache_len());
                },
                BatchSize::LargeInput,
            );
        });

        let mut warm = table(len);
        for &offset in &offsets {
            warm.set_scroll_offset(offset);
        }
        group.bench_with_input(BenchmarkId::new("warm", len), &offsets, |b, offsets| {
            b.iter(|| {
                for &offset in offsets.iter().rev().chain(offsets) {
                    warm.set_scroll_offset(offset);
                }
                black_box(warm.cache_len());
            });
        });
    }

    group.finish();
}

fn bench_select_all_then_scroll(c: &mut Criterion) {
    c.bench_function("virtual_table/select_all_scroll", |b| {
        b.iter_batched(
            || table(100_000),
            |mut table| {
                table.toggle_all_visible(true);
                for step in 1..100 {
                    table.set_scroll_offset(f64::from(step) * 2_000.0);
                }
                table.toggle_row("key1000", false);
                black_box(table.selected_rows().len());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_window, bench_scroll, bench_select_all_then_scroll);
criterion_main!(benches);

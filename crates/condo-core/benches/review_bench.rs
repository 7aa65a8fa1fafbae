//! # Review Benchmarks
//!
//! Classification, aggregation and export over large record lists.
//!
//! Run with: `cargo bench -p condo-core`

use condo_core::{FlatUnit, UnitRecord, count_by_status, to_csv};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Build N flat records cycling through complete, incomplete and critical rows.
fn create_records(size: usize) -> Vec<UnitRecord> {
    (0..size)
        .map(|i| -> UnitRecord {
            let tax_id = if i % 7 == 0 {
                None
            } else {
                Some(format!("{:03}.000.000-00", i % 1000))
            };
            let email = if i % 3 == 0 {
                None
            } else {
                Some(format!("unit{}@condo.com", i))
            };
            FlatUnit {
                unit: Some(format!("{}", 100 + i)),
                block: Some(format!("{}", (b'A' + (i % 4) as u8) as char)),
                name: Some(format!("Morador {}", i)),
                tax_id,
                mobile: Some("(11) 99999-0000".into()),
                landline: None,
                email,
                ..FlatUnit::new((i + 1).to_string())
            }
            .into()
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_count_by_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_by_status");

    for size in [100, 1000, 10000].iter() {
        let records = create_records(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(count_by_status(records)));
        });
    }

    group.finish();
}

fn bench_to_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_csv");

    for size in [100, 1000, 10000].iter() {
        let records = create_records(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(to_csv(records)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_count_by_status, bench_to_csv);
criterion_main!(benches);

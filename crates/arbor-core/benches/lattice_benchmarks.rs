//! Benchmarks for tree construction and backward induction.
//!
//! Run with: cargo bench -p arbor-core

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use arbor_core::prelude::*;

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");

    for periods in [4usize, 8, 12, 16] {
        group.throughput(Throughput::Elements((1u64 << (periods + 1)) - 1));
        group.bench_with_input(BenchmarkId::from_parameter(periods), &periods, |b, &p| {
            b.iter(|| build_tree(black_box(0.05), 1.05, 0.95, p as i64).unwrap());
        });
    }

    group.finish();
}

fn bench_valuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation");
    let valuator = BondValuator::new(0.55, 0.45).unwrap();

    for periods in [4u32, 8, 12, 16] {
        let plain = Bond::new(100.0, 0.05, 6, 6 * periods).unwrap();
        let callable = plain
            .clone()
            .with_option(EmbeddedOption::call(101.0).unwrap());
        let mut tree = build_tree(0.035, 1.1, 0.95, i64::from(periods)).unwrap();

        group.bench_with_input(BenchmarkId::new("plain", periods), &plain, |b, bond| {
            b.iter(|| valuator.price(black_box(bond), &mut tree).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("callable", periods), &callable, |b, bond| {
            b.iter(|| valuator.price(black_box(bond), &mut tree).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_tree, bench_valuation);
criterion_main!(benches);

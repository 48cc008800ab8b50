//! Benchmarks for examinations
//!
//! Tests performance of:
//! - Flat rule sets, pedantic vs. first-ailment
//! - Per-element checks over growing collections
//! - Nested rule sets

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use validoctor::prelude::*;

fn product_rules() -> MultiRule<Value> {
    let facts = MultiRule::structural(
        "facts",
        [
            Binding::rule("calories", at_most(900)),
            Binding::rule("unit", one_of(["g", "ml"])),
        ],
    );
    MultiRule::structural(
        "product",
        [
            Binding::rule("name", not_blank()),
            Binding::rule("name", max_length(64)),
            Binding::nested("nutritionFacts", facts),
            Binding::each("reviewScores", in_range(1, 5)),
        ],
    )
}

// ============================================================================
// FLAT
// ============================================================================

fn bench_traits(c: &mut Criterion) {
    let mut group = c.benchmark_group("traits");
    let rules = product_rules();
    let healthy = json!({
        "name": "Oats",
        "nutritionFacts": { "calories": 380, "unit": "g" },
        "reviewScores": [5, 4, 4]
    });
    let sick = json!({
        "name": "",
        "nutritionFacts": { "calories": 1200, "unit": "oz" },
        "reviewScores": [0, 9, 4]
    });

    for (label, doctor) in [
        ("pedantic", Validoctor::default()),
        ("first_ailment", Validoctor::builder().pedantic(false).build()),
    ] {
        group.bench_function(BenchmarkId::new(label, "healthy"), |b| {
            b.iter(|| doctor.examine(black_box(&healthy), [&rules]));
        });
        group.bench_function(BenchmarkId::new(label, "sick"), |b| {
            b.iter(|| doctor.examine(black_box(&sick), [&rules]));
        });
    }

    group.finish();
}

// ============================================================================
// COLLECTIONS
// ============================================================================

fn bench_for_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("for_elements");
    let rules = MultiRule::structural("scores", [Binding::each("scores", in_range(1, 5))]);
    let doctor = Validoctor::default();

    for size in [10_usize, 100, 1_000] {
        let patient = json!({ "scores": (0..size).map(|i| i % 7).collect::<Vec<_>>() });
        group.bench_with_input(BenchmarkId::from_parameter(size), &patient, |b, patient| {
            b.iter(|| doctor.examine(black_box(patient), [&rules]));
        });
    }

    group.finish();
}

// ============================================================================
// NESTING
// ============================================================================

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");
    let doctor = Validoctor::default();

    for depth in [1_usize, 4, 16] {
        let mut rules = MultiRule::structural("leaf", [Binding::rule("name", not_blank())]);
        let mut patient = json!({ "name": "leaf" });
        for _ in 0..depth {
            rules = MultiRule::structural("level", [Binding::nested("child", rules)]);
            patient = json!({ "child": patient });
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &patient, |b, patient| {
            b.iter(|| doctor.examine(black_box(patient), [&rules]));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_traits, bench_for_elements, bench_nesting);
criterion_main!(benches);

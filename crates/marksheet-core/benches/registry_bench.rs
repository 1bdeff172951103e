//! # Registry Benchmarks
//!
//! Performance benchmarks for validation, derivation and the in-memory store.
//!
//! Run with: `cargo bench -p marksheet-core`

use chrono::{Months, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use marksheet_core::{NewStudent, Registry, StudentId, derive_results, validate_for_update};
use std::hint::black_box;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("date")
}

fn sample_input() -> NewStudent {
    NewStudent {
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        date_of_birth: today().checked_sub_months(Months::new(18 * 12)),
        section: Some("B".to_string()),
        gender: Some("F".to_string()),
        marks1: Some(72),
        marks2: Some(64),
        marks3: Some(81),
        ..NewStudent::default()
    }
}

/// Create a registry holding `size` students.
fn create_populated_registry(size: usize) -> Registry {
    let mut registry = Registry::new();
    let input = sample_input();
    for _ in 0..size {
        registry.create_student_on(&input, today()).expect("create");
    }
    registry
}

fn bench_derivation(c: &mut Criterion) {
    let marks = validate_for_update(Some(40), Some(50), Some(36)).expect("marks");
    c.bench_function("derive_results", |b| b.iter(|| derive_results(black_box(marks))));
}

fn bench_create(c: &mut Criterion) {
    let input = sample_input();
    c.bench_function("create_student_in_memory", |b| {
        let mut registry = Registry::new();
        b.iter(|| registry.create_student_on(black_box(&input), today()));
    });
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_student_marks");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut registry = create_populated_registry(size);
            let id = StudentId(size as u64 / 2 + 1);
            b.iter(|| registry.update_student_marks(black_box(id), Some(35), Some(70), Some(99)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_derivation, bench_create, bench_update);
criterion_main!(benches);

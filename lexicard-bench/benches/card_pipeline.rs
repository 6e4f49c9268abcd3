//! lexicard benchmark suite.
//!
//! Budgets for the local, non-network half of a phrase:
//!   parse_clean_payload ............ < 20μs
//!   parse_wrapped_payload .......... < 30μs
//!   assemble_card .................. < 5μs
//!   parse_and_assemble_large ....... < 200μs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lexicard_core::{assemble, parse_response};

const CLEAN: &str = r#"{"phrase":"kissa","translations":["Cat","Kitty"],"examples":["Kissa nukkuu sohvalla.","Minulla on kaksi kissaa."],"notes":["Partitive: kissaa","Genitive: kissan"]}"#;

fn wrapped(payload: &str) -> String {
    format!("Sure! Here is the card you asked for:\n```json\n{payload}\n```\nLet me know if you need another one.")
}

fn large_payload(entries: usize) -> String {
    let list = |prefix: &str| {
        (0..entries)
            .map(|i| format!("\"{prefix} number {i} with some extra words\""))
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        r#"{{"phrase":"hyvää huomenta","translations":[{}],"examples":[{}],"notes":[{}]}}"#,
        list("Translation"),
        list("Example"),
        list("Note")
    )
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_clean_payload", |b| {
        b.iter(|| parse_response(black_box(CLEAN)));
    });

    let text = wrapped(CLEAN);
    c.bench_function("parse_wrapped_payload", |b| {
        b.iter(|| parse_response(black_box(&text)));
    });
}

fn bench_assemble(c: &mut Criterion) {
    let card = parse_response(CLEAN).expect("fixture parses");
    c.bench_function("assemble_card", |b| {
        b.iter(|| assemble(black_box(&card)));
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_assemble");
    for entries in [1, 10, 100] {
        let text = wrapped(&large_payload(entries));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &text, |b, text| {
            b.iter(|| parse_response(black_box(text)).map(|card| assemble(&card)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_assemble, bench_end_to_end);
criterion_main!(benches);

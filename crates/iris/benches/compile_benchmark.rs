//! Parser and generator benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iris::{compile, generate, parse, CompileOptions};

const SIMPLE_DOC: &str = "V(g4){ S(h4) }";

const MEDIUM_DOC: &str = include_str!("../../../tests/fixtures/card.iris");

const README_DOC: &str = include_str!("../../../tests/fixtures/example.iris");

fn parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple", |b| b.iter(|| parse(black_box(SIMPLE_DOC))));
}

fn parse_medium(c: &mut Criterion) {
    c.bench_function("parse_medium", |b| b.iter(|| parse(black_box(MEDIUM_DOC))));
}

fn generate_readme(c: &mut Criterion) {
    let options = CompileOptions::default();
    let tree = match parse(README_DOC) {
        Ok(tree) => tree,
        Err(err) => panic!("{err}"),
    };
    c.bench_function("generate_readme", |b| {
        b.iter(|| generate(black_box(&tree), &options))
    });
}

fn compile_medium(c: &mut Criterion) {
    let options = CompileOptions::default();
    c.bench_function("compile_medium", |b| {
        b.iter(|| compile(black_box(MEDIUM_DOC), &options))
    });
}

criterion_group!(benches, parse_simple, parse_medium, generate_readme, compile_medium);
criterion_main!(benches);

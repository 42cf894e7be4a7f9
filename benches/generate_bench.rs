//! Generation Benchmark
//!
//! Measures manifest-to-source throughput for holders and containers.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use checkt::common::Diagnostic;
use checkt::generator::{GeneratorOptions, MemorySink, SignatureStyle, emit, generate};
use checkt::model::Manifest;

// =============================================================================
// Manifest Generation
// =============================================================================

/// `namespaces` packages, each with `types` generic types carrying `tokens`
/// token accessors, plus one container per package.
fn generate_manifest(namespaces: usize, types: usize, tokens: usize) -> String {
    let mut decls = Vec::new();
    for ns in 0..namespaces {
        for ty in 0..types {
            let params: Vec<String> = (0..tokens)
                .map(|i| format!(r#"{{ "name": "T{i}" }}"#))
                .collect();
            let members: Vec<String> = (0..tokens)
                .map(|i| {
                    format!(
                        r#"{{ "name": "getType{i}", "kind": "method", "type": "Class<T{i}>", "markers": [{{ "kind": "typeToken" }}] }}"#
                    )
                })
                .collect();
            decls.push(format!(
                r#"{{ "name": "Type{ty}", "namespace": "bench.ns{ns}", "visibility": "public", "typeParameters": [{}], "members": [{}] }}"#,
                params.join(", "),
                members.join(", ")
            ));
        }
        decls.push(format!(
            r#"{{ "name": "MapDecl", "namespace": "bench.ns{ns}", "superclass": "Container<Key, Value>", "markers": [{{ "kind": "container", "value": "IdMap" }}] }}"#
        ));
    }
    format!(r#"{{ "types": [{}] }}"#, decls.join(",\n"))
}

fn load(namespaces: usize, types: usize, tokens: usize) -> Manifest {
    match Manifest::from_json_str(&generate_manifest(namespaces, types, tokens)) {
        Ok(manifest) => manifest,
        Err(err) => panic!("benchmark manifest must parse: {err}"),
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_generate_small(c: &mut Criterion) {
    let manifest = load(1, 5, 2);
    let options = GeneratorOptions::default();
    c.bench_function("generate_small", |b| {
        b.iter(|| {
            let mut diagnostics: Vec<Diagnostic> = Vec::new();
            black_box(generate(&manifest, &options, &mut diagnostics))
        })
    });
}

/// Benchmark: holders across many namespaces (parallel path)
fn bench_generate_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_throughput");
    for (namespaces, types) in [(4, 10), (16, 10), (64, 10), (64, 40)] {
        let manifest = load(namespaces, types, 3);
        let options = GeneratorOptions::default();
        let label = format!("{namespaces}ns_{types}types");
        group.throughput(Throughput::Elements((namespaces * types) as u64));
        group.bench_with_input(BenchmarkId::new("generate", &label), &manifest, |b, m| {
            b.iter(|| {
                let mut diagnostics: Vec<Diagnostic> = Vec::new();
                black_box(generate(m, &options, &mut diagnostics))
            })
        });
    }
    group.finish();
}

/// Benchmark: wide types, where partial casts dominate
fn bench_signature_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature_style");
    let manifest = load(4, 10, 8);
    for style in [SignatureStyle::Wildcard, SignatureStyle::Passthrough] {
        let options = GeneratorOptions {
            signature_style: style,
            ..GeneratorOptions::default()
        };
        group.bench_function(format!("{style:?}"), |b| {
            b.iter(|| {
                let mut diagnostics: Vec<Diagnostic> = Vec::new();
                black_box(generate(&manifest, &options, &mut diagnostics))
            })
        });
    }
    group.finish();
}

fn bench_emit_memory(c: &mut Criterion) {
    let manifest = load(32, 10, 3);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let targets = generate(&manifest, &GeneratorOptions::default(), &mut diagnostics);
    c.bench_function("emit_memory_sink", |b| {
        b.iter(|| {
            let sink = MemorySink::new();
            let mut diagnostics: Vec<Diagnostic> = Vec::new();
            black_box(emit(&targets, &sink, &mut diagnostics))
        })
    });
}

criterion_group!(
    benches,
    bench_generate_small,
    bench_generate_throughput,
    bench_signature_styles,
    bench_emit_memory,
);
criterion_main!(benches);

use checkt_common::Diagnostic;
use checkt_generator::{
    FsSink, GeneratorOptions, MemorySink, OutputTarget, SignatureStyle, emit, generate,
};
use checkt_model::Manifest;
use std::path::PathBuf;

const MANIFEST: &str = r#"{
  "types": [
    {
      "name": "Relation", "namespace": "com.example", "visibility": "public",
      "typeParameters": [{ "name": "T1" }, { "name": "T2" }, { "name": "T3", "bounds": ["Number"] }],
      "members": [
        { "name": "getType2", "kind": "method", "type": "Class<T2>", "markers": [{ "kind": "typeToken" }] },
        { "name": "getType1", "kind": "method", "type": "Class<T1>", "markers": [{ "kind": "typeToken" }] },
        { "name": "size", "kind": "method", "type": "int" }
      ]
    },
    {
      "name": "Box", "namespace": "com.example",
      "typeParameters": [{ "name": "T" }],
      "members": [
        { "name": "getType", "kind": "method", "type": "Class<T>", "markers": [{ "kind": "typeToken" }] }
      ]
    },
    {
      "name": "Broken", "namespace": "com.example", "visibility": "public",
      "typeParameters": [{ "name": "T" }],
      "members": [
        { "name": "getType", "kind": "method", "type": "Class<T>", "markers": [{ "kind": "typeToken" }] },
        { "name": "getCount", "kind": "method", "type": "int", "markers": [{ "kind": "typeToken" }] }
      ]
    },
    {
      "name": "Cell", "namespace": "org.other",
      "typeParameters": [{ "name": "V" }],
      "members": [
        { "name": "valueType", "kind": "method", "type": "Class<V>", "markers": [{ "kind": "typeToken" }] }
      ]
    },
    {
      "name": "FooMapDecl", "namespace": "com.example", "visibility": "public",
      "superclass": "Container<Foo, Bar>",
      "markers": [{ "kind": "container", "value": "FooMap" }]
    }
  ]
}"#;

fn run(manifest: &Manifest, options: &GeneratorOptions) -> (Vec<OutputTarget>, Vec<Diagnostic>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let targets = generate(manifest, options, &mut diagnostics);
    (targets, diagnostics)
}

fn target<'a>(targets: &'a [OutputTarget], name: &str) -> &'a OutputTarget {
    targets
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no target {name}"))
}

#[test]
fn test_targets_are_sorted_and_complete() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, _) = run(&manifest, &GeneratorOptions::default());
    let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["com.example.FooMap", "com.example.SafeCast", "org.other.SafeCast"]
    );
    let holder = target(&targets, "com.example.SafeCast");
    assert_eq!(
        holder.path,
        PathBuf::from("com").join("example").join("SafeCast.java")
    );
    assert_eq!(
        holder.originating,
        vec!["com.example.Box".to_string(), "com.example.Relation".to_string()]
    );
}

#[test]
fn test_output_is_independent_of_declaration_order() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let mut shuffled = manifest.clone();
    shuffled.types.reverse();
    for decl in &mut shuffled.types {
        decl.members.reverse();
    }
    shuffled.types.swap(0, 2);

    let options = GeneratorOptions::default();
    let (first, _) = run(&manifest, &options);
    let (second, _) = run(&shuffled, &options);
    assert_eq!(first, second);

    let (again, _) = run(&manifest, &options);
    assert_eq!(first, again);
}

#[test]
fn test_shape_error_skips_only_the_offending_type() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, diagnostics) = run(&manifest, &GeneratorOptions::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1001);
    assert_eq!(
        diagnostics[0].element.as_deref(),
        Some("com.example.Broken#getCount")
    );

    let holder = &target(&targets, "com.example.SafeCast").contents;
    assert!(!holder.contains("Broken"));
    assert!(holder.contains("Relation<T1, T2, ?> cast(Relation<?, ?, ?> o"));
    assert!(holder.contains("Box<T> cast(Box<?> o, Class<T> type)"));
}

#[test]
fn test_wildcards_mark_exactly_the_erased_parameters() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, _) = run(&manifest, &GeneratorOptions::default());
    let holder = &target(&targets, "com.example.SafeCast").contents;
    assert!(holder.contains(
        "public static <T1, T2> Relation<T1, T2, ?> cast(Relation<?, ?, ?> o, Class<T1> type1, Class<T2> type2) {"
    ));
    assert!(holder.contains(
        "public static <T1> Relation<T1, ?, ?> castByType1(Relation<?, ?, ?> o, Class<T1> type1) {"
    ));
    assert!(holder.contains(
        "public static <T2> Relation<?, T2, ?> castByType2(Relation<?, ?, ?> o, Class<T2> type2) {"
    ));
    // Box is package-private.
    assert!(holder.contains("    static <T> Box<T> cast(Box<?> o, Class<T> type) {"));
    assert!(holder.starts_with("package com.example;\n\npublic final class SafeCast {"));
}

#[test]
fn test_holder_visibility_follows_owning_types() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, _) = run(&manifest, &GeneratorOptions::default());
    let other = &target(&targets, "org.other.SafeCast").contents;
    let expected = "\
package org.other;

final class SafeCast {
    private SafeCast() {}

    @SuppressWarnings(\"unchecked\")
    static <V> Cell<V> cast(Cell<?> o, Class<V> valueType) {
        if (valueType == null || o.valueType() != valueType) {
            throw new ClassCastException();
        }
        return (Cell<V>) o;
    }
}
";
    assert_eq!(other, expected);
}

#[test]
fn test_container_target() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, _) = run(&manifest, &GeneratorOptions::default());
    let container = target(&targets, "com.example.FooMap");
    assert_eq!(container.originating, vec!["com.example.FooMapDecl".to_string()]);
    assert!(
        container
            .contents
            .contains("private final Map<Object, Object> map = new IdentityHashMap<>();")
    );
    assert!(container.contents.contains("public Bar put(Foo key, Bar value) {"));
    assert!(container.contents.contains("return (Bar) map.get(key);"));
}

#[test]
fn test_passthrough_style_and_custom_names() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let options = GeneratorOptions {
        signature_style: SignatureStyle::Passthrough,
        holder_name: "Narrow".to_string(),
        ..GeneratorOptions::default()
    };
    let (targets, _) = run(&manifest, &options);
    let holder = &target(&targets, "com.example.Narrow").contents;
    assert!(holder.contains(
        "public static <T1, T2, T3 extends Number> Relation<T1, T2, T3> cast(Relation<?, ?, T3> o, Class<T1> type1, Class<T2> type2) {"
    ));
    assert!(holder.contains("private Narrow() {}"));
}

#[test]
fn test_crlf_output() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let mut options = GeneratorOptions::default();
    options.printer.new_line = checkt_emitter::NewLineKind::Crlf;
    let (targets, _) = run(&manifest, &options);
    for target in &targets {
        assert!(!target.contents.replace("\r\n", "").contains('\n'));
    }
}

#[test]
fn test_emit_into_memory_sink() {
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let (targets, _) = run(&manifest, &GeneratorOptions::default());
    let sink = MemorySink::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let summary = emit(&targets, &sink, &mut diagnostics);
    assert!(summary.is_complete());
    assert!(diagnostics.is_empty());
    assert_eq!(summary.written.len(), 3);
    assert_eq!(
        sink.names(),
        vec![
            "com.example.FooMap".to_string(),
            "com.example.SafeCast".to_string(),
            "org.other.SafeCast".to_string(),
        ]
    );
    assert_eq!(
        sink.get("org.other.SafeCast"),
        Some(target(&targets, "org.other.SafeCast").contents.clone())
    );
}

#[test]
fn test_empty_manifest_generates_nothing() {
    let (targets, diagnostics) = run(&Manifest::default(), &GeneratorOptions::default());
    assert!(targets.is_empty());
    assert!(diagnostics.is_empty());
}

const CLASHING_DECLS: [&str; 4] = [
    r#"{ "name": "ADecl", "namespace": "p", "superclass": "Container<A, X>",
         "markers": [{ "kind": "container", "value": "FooMap" }] }"#,
    r#"{ "name": "BDecl", "namespace": "p", "superclass": "Container<B, Y>",
         "markers": [{ "kind": "container", "value": "FooMap" }] }"#,
    r#"{ "name": "Box", "namespace": "p", "typeParameters": [{ "name": "T" }],
         "members": [{ "name": "getType", "kind": "method", "type": "Class<T>",
                       "markers": [{ "kind": "typeToken" }] }] }"#,
    r#"{ "name": "SafeCastDecl", "namespace": "p", "superclass": "Container<C, Z>",
         "markers": [{ "kind": "container", "value": "SafeCast" }] }"#,
];

fn clashing_manifest(reversed: bool) -> Manifest {
    let mut decls = CLASHING_DECLS.to_vec();
    if reversed {
        decls.reverse();
    }
    Manifest::from_json_str(&format!(r#"{{ "types": [{}] }}"#, decls.join(", "))).unwrap()
}

#[test]
fn test_clashing_targets_resolve_independently_of_manifest_order() {
    let options = GeneratorOptions::default();
    let (forward, forward_diags) = run(&clashing_manifest(false), &options);
    let (backward, backward_diags) = run(&clashing_manifest(true), &options);

    assert_eq!(forward, backward);
    let names: Vec<&str> = forward.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["p.FooMap", "p.SafeCast"]);
    assert_eq!(target(&forward, "p.FooMap").originating, vec!["p.ADecl".to_string()]);
    assert_eq!(target(&forward, "p.SafeCast").originating, vec!["p.Box".to_string()]);

    for diagnostics in [&forward_diags, &backward_diags] {
        let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![4002, 4002]);
        assert_eq!(diagnostics[0].element.as_deref(), Some("p.FooMap"));
        assert_eq!(
            diagnostics[0].message_text,
            "Class 'p.FooMap' generated from 'p.BDecl' clashes with the one generated from 'p.ADecl' and is skipped."
        );
    }
}

#[test]
fn test_clashing_targets_persist_the_same_contents() {
    let options = GeneratorOptions::default();
    let mut persisted = Vec::new();
    for reversed in [false, true] {
        let (targets, _) = run(&clashing_manifest(reversed), &options);
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let summary = emit(&targets, &sink, &mut diagnostics);
        assert!(summary.is_complete());
        assert!(diagnostics.is_empty());

        let foo_map = std::fs::read_to_string(dir.path().join("p/FooMap.java")).unwrap();
        let holder = std::fs::read_to_string(dir.path().join("p/SafeCast.java")).unwrap();
        assert!(foo_map.contains("X put(A key, X value) {"));
        assert!(holder.contains("static <T> Box<T> cast(Box<?> o, Class<T> type) {"));
        persisted.push((foo_map, holder));
    }
    assert_eq!(persisted[0], persisted[1]);
}

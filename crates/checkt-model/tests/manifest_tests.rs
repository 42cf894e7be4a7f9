use checkt_model::{Manifest, ManifestError, Marker, MemberKind, Visibility};
use std::io::Write;

const RELATION: &str = r#"{
  "types": [{
    "name": "Relation",
    "namespace": "com.example",
    "visibility": "public",
    "typeParameters": [{ "name": "T1" }, { "name": "T2", "bounds": ["Number"] }],
    "members": [
      { "name": "getType1", "kind": "method", "type": "Class<T1>",
        "markers": [{ "kind": "typeToken" }] },
      { "name": "type2", "kind": "field", "type": "Class<T2>" }
    ]
  }, {
    "name": "FooMapDecl",
    "superclass": "Container<Foo, Bar>",
    "markers": [{ "kind": "container", "value": "FooMap" }]
  }]
}"#;

#[test]
fn test_parse_manifest() {
    let manifest = Manifest::from_json_str(RELATION).unwrap();
    assert_eq!(manifest.types.len(), 2);

    let relation = &manifest.types[0];
    assert_eq!(relation.qualified_name(), "com.example.Relation");
    assert_eq!(relation.visibility, Visibility::Public);
    assert_eq!(relation.type_parameters[1].bounds, vec!["Number".to_string()]);
    assert_eq!(relation.members[0].kind, MemberKind::Method);
    assert_eq!(relation.members[0].ty.as_deref(), Some("Class<T1>"));
    assert_eq!(relation.members[0].markers, vec![Marker::TypeToken]);
    assert!(relation.members[1].markers.is_empty());

    let container = &manifest.types[1];
    assert_eq!(container.namespace, "");
    assert_eq!(container.visibility, Visibility::Package);
    assert_eq!(
        container.markers,
        vec![Marker::Container {
            value: "FooMap".to_string()
        }]
    );
}

#[test]
fn test_manifest_round_trips_through_pretty_json() {
    let manifest = Manifest::from_json_str(RELATION).unwrap();
    let text = manifest.to_json_pretty().unwrap();
    assert_eq!(Manifest::from_json_str(&text).unwrap(), manifest);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RELATION.as_bytes()).unwrap();
    let manifest = Manifest::load(file.path()).unwrap();
    assert_eq!(manifest.types.len(), 2);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = Manifest::load(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_unknown_marker_kind_is_rejected() {
    let err = Manifest::from_json_str(
        r#"{"types": [{"name": "A", "markers": [{"kind": "other"}]}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
}

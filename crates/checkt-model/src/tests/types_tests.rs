use super::*;

#[test]
fn test_parse_simple_names() {
    assert_eq!(parse_type("T").unwrap(), TypeRef::var("T"));
    assert_eq!(
        parse_type("java.lang.String").unwrap(),
        TypeRef::named("java.lang.String", vec![])
    );
    assert_eq!(
        parse_type("int").unwrap(),
        TypeRef::Primitive("int".to_string())
    );
}

#[test]
fn test_parse_nested_arguments() {
    let ty = parse_type("java.util.Map<K, java.util.List<V>>").unwrap();
    assert_eq!(
        ty,
        TypeRef::named(
            "java.util.Map",
            vec![
                TypeRef::var("K"),
                TypeRef::named("java.util.List", vec![TypeRef::var("V")]),
            ]
        )
    );
    assert_eq!(ty.to_string(), "java.util.Map<K, java.util.List<V>>");
}

#[test]
fn test_parse_wildcards_and_arrays() {
    let ty = parse_type("Class<? extends Number>").unwrap();
    assert_eq!(ty.to_string(), "Class<? extends Number>");

    let ty = parse_type("Comparator<? super T>").unwrap();
    assert_eq!(ty.to_string(), "Comparator<? super T>");

    let ty = parse_type("List<?>").unwrap();
    assert_eq!(ty.type_arguments(), &[TypeRef::unknown()]);

    let ty = parse_type("int[][]").unwrap();
    assert_eq!(ty.to_string(), "int[][]");
    assert!(!ty.is_parameterized());
}

#[test]
fn test_parse_tolerates_whitespace() {
    let ty = parse_type("  Map < K ,V > ").unwrap();
    assert_eq!(ty.to_string(), "Map<K, V>");
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_type(""), Err(TypeParseError::Empty));
    assert_eq!(parse_type("   "), Err(TypeParseError::Empty));
    assert!(matches!(
        parse_type("Class<T"),
        Err(TypeParseError::Expected { expected: "'>'", .. })
    ));
    assert!(matches!(
        parse_type("Class<T>>"),
        Err(TypeParseError::Trailing(8))
    ));
    assert!(matches!(
        parse_type("List<int>"),
        Err(TypeParseError::PrimitiveArgument(_))
    ));
    assert!(matches!(
        parse_type("Foo#Bar"),
        Err(TypeParseError::UnexpectedChar { ch: '#', pos: 3 })
    ));
    assert!(matches!(
        parse_type("?"),
        Err(TypeParseError::Expected { .. })
    ));
}

#[test]
fn test_simple_name_detection() {
    assert_eq!(parse_type("T1").unwrap().as_simple_name(), Some("T1"));
    assert_eq!(parse_type("a.T1").unwrap().as_simple_name(), None);
    assert_eq!(parse_type("T1<X>").unwrap().as_simple_name(), None);
    assert_eq!(parse_type("T1[]").unwrap().as_simple_name(), None);
}

#[test]
fn test_for_each_simple_name_walks_everything() {
    let ty = parse_type("Map<K, List<? extends V>[]>").unwrap();
    let mut names = Vec::new();
    ty.for_each_simple_name(&mut |n| names.push(n.to_string()));
    assert_eq!(names, vec!["K", "V"]);
}

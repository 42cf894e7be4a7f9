//! Java identifier rules for generated names.

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "_",
];

#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// A non-reserved identifier made of letters, digits, `_` and `$`, not starting with a digit.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_reserved(name)
}

/// Make `name` usable as a local: reserved words get a trailing `_`.
#[must_use]
pub fn local_name(name: &str) -> String {
    if is_reserved(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// `base`, or `base` with enough `_` appended to avoid every name in `taken`.
#[must_use]
pub fn fresh_name(base: &str, taken: &[&str]) -> String {
    let mut name = base.to_string();
    while taken.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

/// Relative source path for a qualified class name: `a.b.C` → `a/b/C.java`.
#[must_use]
pub fn source_path(namespace: &str, simple_name: &str) -> std::path::PathBuf {
    let mut path = std::path::PathBuf::new();
    for segment in namespace.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{simple_name}.java"));
    path
}

#[cfg(test)]
#[path = "tests/naming_tests.rs"]
mod naming_tests;

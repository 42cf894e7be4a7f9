//! Resolved build-time descriptors.
//!
//! These are materialized once per generation pass from a [`crate::Manifest`]
//! and dropped after emission.

use crate::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    /// Package-private; visible within the namespace only.
    #[default]
    Package,
}

impl Visibility {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// A declared type parameter. Its identity is its index in the declaring type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    /// `T`, or `T extends A & B` with the bounds reproduced verbatim.
    #[must_use]
    pub fn declaration(&self) -> String {
        if self.bounds.is_empty() {
            return self.name.clone();
        }
        let bounds: Vec<String> = self.bounds.iter().map(ToString::to_string).collect();
        format!("{} extends {}", self.name, bounds.join(" & "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwningType {
    pub namespace: String,
    pub simple_name: String,
    pub visibility: Visibility,
    pub type_parameters: Vec<TypeParameter>,
}

impl OwningType {
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.simple_name)
    }

    /// Index of the type parameter declared with `name`.
    #[must_use]
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.type_parameters.iter().position(|p| p.name == name)
    }
}

/// Join a namespace and a simple name; the default namespace has no prefix.
#[must_use]
pub fn qualify(namespace: &str, simple_name: &str) -> String {
    if namespace.is_empty() {
        simple_name.to_string()
    } else {
        format!("{namespace}.{simple_name}")
    }
}

/// A zero-argument method marked as a type token accessor.
#[derive(Clone, Debug)]
pub struct TokenAccessor {
    pub owner: Arc<OwningType>,
    pub name: String,
    pub return_type: TypeRef,
    /// The method's own type parameters; they shadow the owner's.
    pub method_type_parameters: Vec<String>,
}

impl TokenAccessor {
    /// `pkg.Type#method`, used to attribute diagnostics.
    #[must_use]
    pub fn element_name(&self) -> String {
        format!("{}#{}", self.owner.qualified_name(), self.name)
    }

    #[must_use]
    pub fn token_name(&self) -> TokenName {
        TokenName::from_accessor(&self.name)
    }

    /// Resolve a type occurrence to an owning-type parameter index.
    ///
    /// Only a bare simple name counts, and a method type parameter of the same
    /// name hides the owner's.
    #[must_use]
    pub fn resolve_type_variable(&self, ty: &TypeRef) -> Option<usize> {
        let name = ty.as_simple_name()?;
        if self.method_type_parameters.iter().any(|p| p == name) {
            return None;
        }
        self.owner.param_index(name)
    }

    /// Owner parameters that appear as a direct type argument of the return type,
    /// in argument order, without duplicates.
    #[must_use]
    pub fn witnessed_parameters(&self) -> Vec<usize> {
        let mut witnessed = Vec::new();
        for arg in self.return_type.type_arguments() {
            if let Some(index) = self.resolve_type_variable(arg) {
                if !witnessed.contains(&index) {
                    witnessed.push(index);
                }
            }
        }
        witnessed
    }
}

/// The accessor name with a conventional `get` prefix removed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenName {
    pub upper: String,
    pub lower: String,
}

impl TokenName {
    #[must_use]
    pub fn from_accessor(accessor: &str) -> Self {
        let base = match accessor.strip_prefix("get") {
            Some(rest) if !rest.is_empty() => rest,
            _ => accessor,
        };
        Self {
            upper: with_first_char(base, char::to_uppercase),
            lower: with_first_char(base, char::to_lowercase),
        }
    }
}

fn with_first_char<I>(s: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.extend(f(first));
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// A type declaring itself as `Container<K, V>` and naming the class to generate.
#[derive(Clone, Debug)]
pub struct ContainerDeclaration {
    pub declaring_type: Arc<OwningType>,
    pub class_name: String,
    pub key_type: TypeRef,
    pub value_type: TypeRef,
}

impl ContainerDeclaration {
    #[must_use]
    pub fn qualified_class_name(&self) -> String {
        qualify(&self.declaring_type.namespace, &self.class_name)
    }
}

#[cfg(test)]
#[path = "tests/descriptors_tests.rs"]
mod descriptors_tests;

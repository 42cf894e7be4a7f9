//! The serializable manifest consumed by the generator.
//!
//! A front-end (annotation scanner, IDE plugin, hand-written file) lists every
//! type that carries a `typeToken` or `container` marker, together with the
//! structural metadata the generator needs:
//!
//! ```json
//! {
//!   "types": [{
//!     "name": "Relation",
//!     "namespace": "com.example",
//!     "visibility": "public",
//!     "typeParameters": [{ "name": "T1" }, { "name": "T2" }],
//!     "members": [
//!       { "name": "getType1", "kind": "method", "type": "Class<T1>",
//!         "markers": [{ "kind": "typeToken" }] },
//!       { "name": "getType2", "kind": "method", "type": "Class<T2>",
//!         "markers": [{ "kind": "typeToken" }] }
//!     ]
//!   }]
//! }
//! ```
//!
//! Type strings are kept verbatim here and parsed during collection, so a
//! malformed type is reported against its declaration instead of failing the
//! whole manifest.

use crate::descriptors::{Visibility, qualify};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Manifest {
    pub fn from_json_str(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Declarations order by content, which gives duplicates a canonical pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    /// Simple name.
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Method,
    Field,
    Constructor,
}

impl MemberKind {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Field => "field",
            Self::Constructor => "constructor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDecl {
    pub name: String,
    pub kind: MemberKind,
    /// Return type for methods, declared type for fields.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Parameter types; token accessors take none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Marker {
    TypeToken,
    Container { value: String },
}

impl Marker {
    #[must_use]
    pub const fn annotation_name(&self) -> &'static str {
        match self {
            Self::TypeToken => "TypeToken",
            Self::Container { .. } => "Container",
        }
    }
}

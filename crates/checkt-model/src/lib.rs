//! Type descriptor model for the checkt generator.
//!
//! - `types`: parsed type expressions (`TypeRef`) and their parser
//! - `descriptors`: resolved build-time descriptors (`OwningType`, `TokenAccessor`, ...)
//! - `manifest`: the serializable input produced by a front-end

pub mod descriptors;
pub mod manifest;
pub mod types;

pub use descriptors::{
    ContainerDeclaration, OwningType, TokenAccessor, TokenName, TypeParameter, Visibility, qualify,
};
pub use manifest::{
    Manifest, ManifestError, Marker, MemberDecl, MemberKind, TypeDecl, TypeParameterDecl,
};
pub use types::{TypeParseError, TypeRef, WildcardBound, parse_type};

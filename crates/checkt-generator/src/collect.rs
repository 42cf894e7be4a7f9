//! Manifest → flat descriptors.
//!
//! Collection resolves each marked declaration against its owning type and
//! reports markers in the wrong place. It never decides what gets generated;
//! that is left to grouping.

use checkt_common::{DiagnosticSink, diagnostic_codes};
use checkt_model::{
    ContainerDeclaration, Manifest, Marker, MemberDecl, MemberKind, OwningType, TokenAccessor,
    TypeDecl, TypeParameter, TypeRef, parse_type,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::naming::is_valid_identifier;

#[derive(Debug, Default)]
pub struct Collected {
    pub accessors: Vec<TokenAccessor>,
    pub containers: Vec<ContainerDeclaration>,
    /// Owning types whose accessors could not all be resolved. Grouping skips
    /// them so that a type never gets casts built from a partial accessor list.
    pub rejected_types: FxHashSet<String>,
}

pub fn collect(manifest: &Manifest, diagnostics: &mut dyn DiagnosticSink) -> Collected {
    let mut collected = Collected::default();
    let canonical = canonical_declarations(manifest);

    for decl in &manifest.types {
        let qualified = decl.qualified_name();
        if !canonical
            .get(&qualified)
            .is_some_and(|chosen| std::ptr::eq(*chosen, decl))
        {
            diagnostics.report_code(
                diagnostic_codes::DUPLICATE_TYPE_DECLARATION,
                Some(qualified.clone()),
                &[&qualified],
            );
            continue;
        }

        let Some(owner) = resolve_owning_type(decl, diagnostics) else {
            collected.rejected_types.insert(qualified);
            continue;
        };
        let owner = Arc::new(owner);

        for marker in &decl.markers {
            match marker {
                Marker::Container { value } => {
                    if let Some(container) = resolve_container(decl, &owner, value, diagnostics) {
                        collected.containers.push(container);
                    }
                }
                Marker::TypeToken => {
                    diagnostics.report_code(
                        diagnostic_codes::UNEXPECTED_MARKER_CARRIER,
                        Some(qualified.clone()),
                        &[marker.annotation_name(), "type", &qualified],
                    );
                }
            }
        }

        for member in &decl.members {
            collect_member(&owner, member, &mut collected, diagnostics);
        }
    }

    debug!(
        accessors = collected.accessors.len(),
        containers = collected.containers.len(),
        rejected = collected.rejected_types.len(),
        "collected manifest"
    );
    collected
}

/// One declaration per qualified name. Duplicates resolve to the least by
/// content, so the pick does not depend on manifest order.
fn canonical_declarations(manifest: &Manifest) -> FxHashMap<String, &TypeDecl> {
    let mut canonical: FxHashMap<String, &TypeDecl> = FxHashMap::default();
    for decl in &manifest.types {
        canonical
            .entry(decl.qualified_name())
            .and_modify(|chosen| {
                if decl < *chosen {
                    *chosen = decl;
                }
            })
            .or_insert(decl);
    }
    canonical
}

fn collect_member(
    owner: &Arc<OwningType>,
    member: &MemberDecl,
    collected: &mut Collected,
    diagnostics: &mut dyn DiagnosticSink,
) {
    let element = format!("{}#{}", owner.qualified_name(), member.name);
    for marker in &member.markers {
        let carrier = match (marker, member.kind) {
            (Marker::TypeToken, MemberKind::Method) if member.parameters.is_empty() => None,
            (Marker::TypeToken, MemberKind::Method) => Some("method with parameters"),
            (_, kind) => Some(kind.describe()),
        };
        if let Some(carrier) = carrier {
            diagnostics.report_code(
                diagnostic_codes::UNEXPECTED_MARKER_CARRIER,
                Some(element.clone()),
                &[marker.annotation_name(), carrier, &member.name],
            );
            continue;
        }

        let return_type = match member.ty.as_deref() {
            None => TypeRef::Primitive("void".to_string()),
            Some(text) => match parse_type(text) {
                Ok(ty) => ty,
                Err(err) => {
                    diagnostics.report_code(
                        diagnostic_codes::MALFORMED_TYPE_EXPRESSION,
                        Some(element.clone()),
                        &[text, &err.to_string()],
                    );
                    collected.rejected_types.insert(owner.qualified_name());
                    continue;
                }
            },
        };

        trace!(accessor = %element, %return_type, "token accessor");
        collected.accessors.push(TokenAccessor {
            owner: Arc::clone(owner),
            name: member.name.clone(),
            return_type,
            method_type_parameters: member
                .type_parameters
                .iter()
                .map(|p| p.name.clone())
                .collect(),
        });
    }
}

fn resolve_owning_type(
    decl: &TypeDecl,
    diagnostics: &mut dyn DiagnosticSink,
) -> Option<OwningType> {
    let mut type_parameters = Vec::with_capacity(decl.type_parameters.len());
    let mut ok = true;
    for param in &decl.type_parameters {
        let mut bounds = Vec::with_capacity(param.bounds.len());
        for bound in &param.bounds {
            match parse_type(bound) {
                Ok(ty) => bounds.push(ty),
                Err(err) => {
                    diagnostics.report_code(
                        diagnostic_codes::MALFORMED_TYPE_EXPRESSION,
                        Some(decl.qualified_name()),
                        &[bound, &err.to_string()],
                    );
                    ok = false;
                }
            }
        }
        type_parameters.push(TypeParameter {
            name: param.name.clone(),
            bounds,
        });
    }
    ok.then(|| OwningType {
        namespace: decl.namespace.clone(),
        simple_name: decl.name.clone(),
        visibility: decl.visibility,
        type_parameters,
    })
}

fn resolve_container(
    decl: &TypeDecl,
    owner: &Arc<OwningType>,
    class_name: &str,
    diagnostics: &mut dyn DiagnosticSink,
) -> Option<ContainerDeclaration> {
    let qualified = decl.qualified_name();
    if !is_valid_identifier(class_name) {
        diagnostics.report_code(
            diagnostic_codes::INVALID_CONTAINER_NAME,
            Some(qualified.clone()),
            &[&qualified, class_name],
        );
        return None;
    }

    let Some(text) = decl.superclass.as_deref() else {
        diagnostics.report_code(
            diagnostic_codes::INVALID_CONTAINER_SUPERCLASS,
            Some(qualified.clone()),
            &[&qualified],
        );
        return None;
    };
    let superclass = match parse_type(text) {
        Ok(ty) => ty,
        Err(err) => {
            diagnostics.report_code(
                diagnostic_codes::MALFORMED_TYPE_EXPRESSION,
                Some(qualified),
                &[text, &err.to_string()],
            );
            return None;
        }
    };

    let [key_type, value_type] = superclass.type_arguments() else {
        diagnostics.report_code(
            diagnostic_codes::INVALID_CONTAINER_SUPERCLASS,
            Some(qualified.clone()),
            &[&qualified],
        );
        return None;
    };

    Some(ContainerDeclaration {
        declaring_type: Arc::clone(owner),
        class_name: class_name.to_string(),
        key_type: key_type.clone(),
        value_type: value_type.clone(),
    })
}

#[cfg(test)]
#[path = "tests/collect_tests.rs"]
mod collect_tests;

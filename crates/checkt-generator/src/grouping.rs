//! Grouping & validation.
//!
//! Token accessors are partitioned by namespace, then by owning type, with
//! `BTreeMap`s at both levels so iteration order depends only on names. Each
//! owning type is validated as a unit: one bad accessor removes the whole type
//! from generation, while its siblings in the namespace are unaffected.

use checkt_common::{DiagnosticSink, diagnostic_codes};
use checkt_model::{OwningType, TokenAccessor};
use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, debug_span};

/// A validated owning type ready for cast emission.
#[derive(Debug, Clone)]
pub struct TypeGroup {
    pub owner: Arc<OwningType>,
    /// Sorted by accessor name.
    pub accessors: Vec<TokenAccessor>,
    /// Indices of the owner's type parameters that some accessor witnesses.
    pub recoverable: FixedBitSet,
}

impl TypeGroup {
    /// Parameter names outside the recoverable set, in declaration order.
    #[must_use]
    pub fn erased_parameters(&self) -> Vec<&str> {
        self.owner
            .type_parameters
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.recoverable.contains(*i))
            .map(|(_, p)| p.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceGroup {
    pub namespace: String,
    /// Sorted by the owner's simple name.
    pub types: Vec<TypeGroup>,
}

impl NamespaceGroup {
    /// True if any owning type in the namespace is public.
    #[must_use]
    pub fn has_public_type(&self) -> bool {
        self.types.iter().any(|t| t.owner.visibility.is_public())
    }
}

/// Partition and validate accessors. Owners listed in `rejected_types` are
/// dropped silently; they were already reported during collection.
pub fn group_accessors(
    accessors: Vec<TokenAccessor>,
    rejected_types: &FxHashSet<String>,
    diagnostics: &mut dyn DiagnosticSink,
) -> Vec<NamespaceGroup> {
    let mut partitioned: BTreeMap<String, BTreeMap<String, Vec<TokenAccessor>>> = BTreeMap::new();
    for accessor in accessors {
        if rejected_types.contains(&accessor.owner.qualified_name()) {
            continue;
        }
        partitioned
            .entry(accessor.owner.namespace.clone())
            .or_default()
            .entry(accessor.owner.simple_name.clone())
            .or_default()
            .push(accessor);
    }

    let mut namespaces = Vec::with_capacity(partitioned.len());
    for (namespace, types) in partitioned {
        let _span = debug_span!("namespace", %namespace).entered();
        let mut groups = Vec::with_capacity(types.len());
        for (_, mut accessors) in types {
            accessors.sort_by(|a, b| a.name.cmp(&b.name));
            if let Some(group) = validate_type(accessors, diagnostics) {
                groups.push(group);
            }
        }
        if groups.is_empty() {
            debug!("no valid owning types; skipping namespace");
            continue;
        }
        namespaces.push(NamespaceGroup {
            namespace,
            types: groups,
        });
    }
    namespaces
}

fn validate_type(
    accessors: Vec<TokenAccessor>,
    diagnostics: &mut dyn DiagnosticSink,
) -> Option<TypeGroup> {
    let owner = Arc::clone(&accessors.first()?.owner);
    let mut recoverable = FixedBitSet::with_capacity(owner.type_parameters.len());
    let mut token_names: FxHashMap<String, &str> = FxHashMap::default();
    let mut valid = true;

    for accessor in &accessors {
        let element = accessor.element_name();
        if !accessor.return_type.is_parameterized() {
            diagnostics.report_code(
                diagnostic_codes::TOKEN_ACCESSOR_MUST_RETURN_REFERENCE,
                Some(element.clone()),
                &[&element, &accessor.return_type.to_string()],
            );
            valid = false;
            continue;
        }

        let witnessed = accessor.witnessed_parameters();
        if witnessed.is_empty() {
            diagnostics.report_code(
                diagnostic_codes::TOKEN_ACCESSOR_WITNESSES_NOTHING,
                Some(element.clone()),
                &[&element, &accessor.return_type.to_string(), &owner.qualified_name()],
            );
            valid = false;
            continue;
        }

        let token = accessor.token_name().upper;
        if let Some(previous) = token_names.get(&token) {
            diagnostics.report_code(
                diagnostic_codes::DUPLICATE_TOKEN_NAME,
                Some(element.clone()),
                &[previous, &accessor.name, &token],
            );
            valid = false;
            continue;
        }
        token_names.insert(token, &accessor.name);

        for param in witnessed {
            recoverable.insert(param);
        }
    }

    if !valid {
        debug!(owner = %owner.qualified_name(), "owning type rejected");
        return None;
    }

    let group = TypeGroup {
        owner,
        accessors,
        recoverable,
    };
    debug!(
        owner = %group.owner.qualified_name(),
        accessors = group.accessors.len(),
        erased = ?group.erased_parameters(),
        "owning type validated"
    );
    Some(group)
}

#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod grouping_tests;

//! One generation pass: manifest → output targets → sink.

use checkt_common::{DiagnosticSink, diagnostic_codes};
use checkt_emitter::JavaPrinter;
use checkt_model::{ContainerDeclaration, Manifest, qualify};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, debug_span, warn};

use crate::casts::holder_unit;
use crate::collect::{Collected, collect};
use crate::containers::container_unit;
use crate::grouping::{NamespaceGroup, group_accessors};
use crate::naming::source_path;
use crate::options::GeneratorOptions;
use crate::sink::{EmitError, SourceSink};

/// A finished compilation unit, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Qualified name of the generated class.
    pub name: String,
    /// Path relative to the output root.
    pub path: PathBuf,
    /// Qualified names of the declarations the target was generated from.
    pub originating: Vec<String>,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Names of targets the sink accepted, in target order.
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

impl EmitSummary {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run collection, grouping and emission for a whole manifest.
///
/// Targets come back sorted by name; the result does not depend on the order
/// of declarations in the manifest. Of several targets with one name, the
/// first by originating declarations is kept and the others are reported.
pub fn generate(
    manifest: &Manifest,
    options: &GeneratorOptions,
    diagnostics: &mut dyn DiagnosticSink,
) -> Vec<OutputTarget> {
    let _span = debug_span!("generate", types = manifest.types.len()).entered();

    let Collected {
        accessors,
        containers,
        rejected_types,
    } = collect(manifest, diagnostics);
    let namespaces = group_accessors(accessors, &rejected_types, diagnostics);

    let holders = namespaces
        .par_iter()
        .map(|namespace| holder_target(namespace, options));
    let container_targets = containers
        .par_iter()
        .map(|container| container_target(container, options));
    let mut targets: Vec<OutputTarget> = holders.chain(container_targets).collect();
    targets.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.originating.cmp(&b.originating))
            .then_with(|| a.contents.cmp(&b.contents))
    });
    let targets = drop_colliding_targets(targets, diagnostics);

    debug!(targets = targets.len(), "generation finished");
    targets
}

/// Hand every target to `sink`. A failed write is reported and affects only
/// that target.
pub fn emit(
    targets: &[OutputTarget],
    sink: &dyn SourceSink,
    diagnostics: &mut dyn DiagnosticSink,
) -> EmitSummary {
    let results: Vec<(&OutputTarget, Result<(), EmitError>)> = targets
        .par_iter()
        .map(|target| (target, sink.write(target)))
        .collect();

    let mut summary = EmitSummary::default();
    for (target, result) in results {
        match result {
            Ok(()) => summary.written.push(target.name.clone()),
            Err(err) => {
                warn!(target = %target.name, error = %err, "failed to emit target");
                let path = target.path.display().to_string();
                diagnostics.report_code(
                    diagnostic_codes::FAILED_TO_WRITE_SOURCE,
                    Some(target.name.clone()),
                    &[&path, &err.to_string()],
                );
                summary.failed.push(target.name.clone());
            }
        }
    }
    summary
}

/// Expects `targets` in canonical order; keeps the first of each name.
fn drop_colliding_targets(
    targets: Vec<OutputTarget>,
    diagnostics: &mut dyn DiagnosticSink,
) -> Vec<OutputTarget> {
    let mut kept: Vec<OutputTarget> = Vec::with_capacity(targets.len());
    for target in targets {
        if let Some(winner) = kept.last().filter(|k| k.name == target.name) {
            warn!(target = %target.name, "skipping clashing target");
            diagnostics.report_code(
                diagnostic_codes::DUPLICATE_OUTPUT_TARGET,
                Some(target.name.clone()),
                &[
                    &target.name,
                    &target.originating.join(", "),
                    &winner.originating.join(", "),
                ],
            );
            continue;
        }
        kept.push(target);
    }
    kept
}

fn holder_target(namespace: &NamespaceGroup, options: &GeneratorOptions) -> OutputTarget {
    let _span = debug_span!("holder", namespace = %namespace.namespace).entered();
    let unit = holder_unit(namespace, options);
    OutputTarget {
        name: qualify(&namespace.namespace, &options.holder_name),
        path: source_path(&namespace.namespace, &options.holder_name),
        originating: namespace
            .types
            .iter()
            .map(|t| t.owner.qualified_name())
            .collect(),
        contents: JavaPrinter::print_unit(&unit, options.printer),
    }
}

fn container_target(container: &ContainerDeclaration, options: &GeneratorOptions) -> OutputTarget {
    let namespace = &container.declaring_type.namespace;
    let unit = container_unit(container, options);
    OutputTarget {
        name: container.qualified_class_name(),
        path: source_path(namespace, &container.class_name),
        originating: vec![container.declaring_type.qualified_name()],
        contents: JavaPrinter::print_unit(&unit, options.printer),
    }
}

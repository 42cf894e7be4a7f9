use anyhow::{Context, Result, bail};
use checkt_common::Diagnostic;
use checkt_generator::{FsSink, MemorySink, OutputTarget, emit, generate};
use checkt_model::Manifest;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use super::args::CliArgs;
use super::config::{
    CheckConfig, ResolvedConfig, apply_cli_overrides, discover_config, resolve_config,
};

#[derive(Debug, Default)]
pub struct GenerationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub targets: Vec<OutputTarget>,
    /// Files written to disk; empty under `--noEmit`.
    pub emitted_files: Vec<PathBuf>,
}

impl GenerationResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Merge `checkt.json` (if any) with the command line.
pub fn effective_config(args: &CliArgs, cwd: &Path) -> Result<(CheckConfig, PathBuf)> {
    let (base_dir, config) = match discover_config(args, cwd)? {
        Some((path, config)) => {
            let base_dir = path
                .parent()
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (base_dir, config)
        }
        None => (cwd.to_path_buf(), CheckConfig::default()),
    };
    Ok((apply_cli_overrides(config, args, cwd), base_dir))
}

pub fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let (config, base_dir) = effective_config(args, cwd)?;
    resolve_config(&config, &base_dir)
}

/// Run one generation pass. With `emit_files` false nothing touches the disk.
pub fn run(args: &CliArgs, cwd: &Path, emit_files: bool) -> Result<GenerationResult> {
    let resolved = resolve(args, cwd)?;
    let Some(manifest_path) = resolved.manifest.as_deref() else {
        bail!(
            "no manifest given; pass a manifest path or a project with a 'manifest' entry (-p)"
        );
    };
    let _span = info_span!("run", manifest = %manifest_path.display()).entered();

    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;

    let mut result = GenerationResult::default();
    result.targets = generate(&manifest, &resolved.generator, &mut result.diagnostics);

    if !emit_files || resolved.no_emit {
        let sink = MemorySink::new();
        emit(&result.targets, &sink, &mut result.diagnostics);
        debug!(targets = sink.len(), "generated without writing");
        return Ok(result);
    }

    let out_dir = resolved.out_dir.unwrap_or_else(|| cwd.to_path_buf());
    let sink = FsSink::new(out_dir);
    let summary = emit(&result.targets, &sink, &mut result.diagnostics);
    result.emitted_files = result
        .targets
        .iter()
        .filter(|t| summary.written.contains(&t.name))
        .map(|t| sink.destination(t))
        .collect();
    debug!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "emit finished"
    );
    Ok(result)
}

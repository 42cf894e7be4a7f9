//! `checkt.json` project configuration.
//!
//! ```json
//! {
//!   "manifest": "build/types.json",
//!   "generatorOptions": {
//!     "outDir": "build/generated",
//!     "signatureStyle": "wildcard",
//!     "holderName": "SafeCast",
//!     "newLine": "lf"
//!   }
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use anyhow::{Context, Result, bail};
use checkt_emitter::NewLineKind;
use checkt_generator::naming::is_valid_identifier;
use checkt_generator::{GeneratorOptions, SignatureStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::args::{CliArgs, NewLine, Style};

pub const CONFIG_FILE_NAME: &str = "checkt.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_options: Option<ConfigOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_emit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line: Option<NewLineKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_style: Option<SignatureStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_cast_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_unchecked: Option<bool>,
}

/// Everything a run needs, with paths made absolute.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub manifest: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub no_emit: bool,
    pub generator: GeneratorOptions,
}

pub fn parse_config(source: &str) -> Result<CheckConfig> {
    serde_json::from_str(source).context("failed to parse checkt.json")
}

pub fn load_config(path: &Path) -> Result<CheckConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// `-p` may name the file itself or a directory containing it.
#[must_use]
pub fn config_path(project: &Path) -> PathBuf {
    if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project.to_path_buf()
    }
}

/// The config to use for a run: the `-p` project, or `checkt.json` in `cwd`
/// when no manifest was given on the command line.
pub fn discover_config(args: &CliArgs, cwd: &Path) -> Result<Option<(PathBuf, CheckConfig)>> {
    let path = match &args.project {
        Some(project) => config_path(&cwd.join(project)),
        None if args.manifest.is_none() => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(None);
            }
            candidate
        }
        None => return Ok(None),
    };
    let config = load_config(&path)?;
    Ok(Some((path, config)))
}

/// Overlay command-line flags on a loaded (or empty) config. Paths given on
/// the command line are relative to `cwd`, so they are stored absolute.
#[must_use]
pub fn apply_cli_overrides(mut config: CheckConfig, args: &CliArgs, cwd: &Path) -> CheckConfig {
    if let Some(manifest) = &args.manifest {
        config.manifest = Some(cwd.join(manifest).display().to_string());
    }
    let options = config.generator_options.get_or_insert_with(ConfigOptions::default);
    if let Some(out_dir) = &args.out_dir {
        options.out_dir = Some(cwd.join(out_dir).display().to_string());
    }
    if args.no_emit {
        options.no_emit = Some(true);
    }
    if let Some(new_line) = args.new_line {
        options.new_line = Some(match new_line {
            NewLine::Lf => NewLineKind::Lf,
            NewLine::Crlf => NewLineKind::Crlf,
        });
    }
    if let Some(style) = args.signature_style {
        options.signature_style = Some(match style {
            Style::Wildcard => SignatureStyle::Wildcard,
            Style::Passthrough => SignatureStyle::Passthrough,
        });
    }
    if let Some(holder_name) = &args.holder_name {
        options.holder_name = Some(holder_name.clone());
    }
    config
}

/// Resolve paths against `base_dir` and fill in defaults.
pub fn resolve_config(config: &CheckConfig, base_dir: &Path) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig {
        manifest: config.manifest.as_deref().map(|m| base_dir.join(m)),
        ..ResolvedConfig::default()
    };
    let Some(options) = config.generator_options.as_ref() else {
        return Ok(resolved);
    };

    resolved.out_dir = options.out_dir.as_deref().map(|d| base_dir.join(d));
    resolved.no_emit = options.no_emit.unwrap_or(false);

    let generator = &mut resolved.generator;
    if let Some(new_line) = options.new_line {
        generator.printer.new_line = new_line;
    }
    if let Some(indent_width) = options.indent_width {
        generator.printer.indent_width = indent_width;
    }
    if let Some(style) = options.signature_style {
        generator.signature_style = style;
    }
    if let Some(name) = &options.holder_name {
        generator.holder_name = identifier("holderName", name)?;
    }
    if let Some(name) = &options.cast_name {
        generator.cast_name = identifier("castName", name)?;
    }
    if let Some(prefix) = &options.partial_cast_prefix {
        generator.partial_cast_prefix = identifier("partialCastPrefix", prefix)?;
    }
    if let Some(suppress) = options.suppress_unchecked {
        generator.suppress_unchecked = suppress;
    }
    Ok(resolved)
}

fn identifier(option: &str, value: &str) -> Result<String> {
    if !is_valid_identifier(value) {
        bail!("option '{option}' must be a valid identifier, got '{value}'");
    }
    Ok(value.to_string())
}

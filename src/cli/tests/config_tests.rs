use clap::Parser;
use std::path::Path;

use super::args::CliArgs;
use super::config::{
    CheckConfig, ConfigOptions, apply_cli_overrides, config_path, load_config, parse_config,
    resolve_config,
};
use checkt_emitter::NewLineKind;
use checkt_generator::SignatureStyle;

#[test]
fn parses_generator_options() {
    let config = parse_config(
        r#"{
            "manifest": "build/types.json",
            "generatorOptions": {
                "outDir": "gen",
                "newLine": "crlf",
                "signatureStyle": "passthrough",
                "holderName": "Narrow",
                "suppressUnchecked": false
            }
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.manifest.as_deref(), Some("build/types.json"));
    let options = config.generator_options.expect("options");
    assert_eq!(options.new_line, Some(NewLineKind::Crlf));
    assert_eq!(options.signature_style, Some(SignatureStyle::Passthrough));
    assert_eq!(options.suppress_unchecked, Some(false));
}

#[test]
fn rejects_unknown_enum_values() {
    assert!(parse_config(r#"{ "generatorOptions": { "signatureStyle": "loose" } }"#).is_err());
}

#[test]
fn resolves_paths_against_config_dir() {
    let config = CheckConfig {
        manifest: Some("types.json".to_string()),
        generator_options: Some(ConfigOptions {
            out_dir: Some("gen".to_string()),
            indent_width: Some(2),
            ..ConfigOptions::default()
        }),
    };
    let resolved = resolve_config(&config, Path::new("/work/project")).expect("resolve");
    assert_eq!(
        resolved.manifest.as_deref(),
        Some(Path::new("/work/project/types.json"))
    );
    assert_eq!(resolved.out_dir.as_deref(), Some(Path::new("/work/project/gen")));
    assert_eq!(resolved.generator.printer.indent_width, 2);
    assert_eq!(resolved.generator.holder_name, "SafeCast");
    assert!(!resolved.no_emit);
}

#[test]
fn rejects_invalid_holder_name() {
    let config = CheckConfig {
        manifest: None,
        generator_options: Some(ConfigOptions {
            holder_name: Some("Safe-Cast".to_string()),
            ..ConfigOptions::default()
        }),
    };
    let err = resolve_config(&config, Path::new("/")).unwrap_err();
    assert!(err.to_string().contains("holderName"));
}

#[test]
fn cli_flags_override_config() {
    let config = CheckConfig {
        manifest: Some("types.json".to_string()),
        generator_options: Some(ConfigOptions {
            holder_name: Some("FromConfig".to_string()),
            signature_style: Some(SignatureStyle::Passthrough),
            ..ConfigOptions::default()
        }),
    };
    let args = CliArgs::try_parse_from([
        "checkt",
        "--holderName",
        "FromCli",
        "--outDir",
        "out",
    ])
    .unwrap();
    let merged = apply_cli_overrides(config, &args, Path::new("/cwd"));
    let options = merged.generator_options.expect("options");
    assert_eq!(options.holder_name.as_deref(), Some("FromCli"));
    assert_eq!(options.signature_style, Some(SignatureStyle::Passthrough));
    assert_eq!(
        options.out_dir.as_deref().map(Path::new),
        Some(Path::new("/cwd/out"))
    );
    assert_eq!(merged.manifest.as_deref(), Some("types.json"));
}

#[test]
fn loads_config_from_project_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("checkt.json"),
        r#"{ "manifest": "types.json" }"#,
    )
    .unwrap();
    let path = config_path(dir.path());
    assert_eq!(path, dir.path().join("checkt.json"));
    let config = load_config(&path).expect("config should load");
    assert_eq!(config.manifest.as_deref(), Some("types.json"));
}

#[test]
fn missing_config_reports_path() {
    let err = load_config(Path::new("/nonexistent/checkt.json")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/checkt.json"));
}

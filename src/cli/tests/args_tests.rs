use clap::Parser;

use super::args::{CliArgs, NewLine, Style};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["checkt"]).expect("default args should parse");

    assert!(args.manifest.is_none());
    assert!(args.project.is_none());
    assert!(args.out_dir.is_none());
    assert!(!args.no_emit);
    assert!(!args.show_config);
    assert!(!args.list_targets);
    assert_eq!(args.signature_style, None);
    assert_eq!(args.pretty, None);
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "checkt",
        "--outDir",
        "gen",
        "--newLine",
        "crlf",
        "--signatureStyle",
        "passthrough",
        "--holderName",
        "Narrow",
        "--noEmit",
        "--pretty",
        "false",
        "types.json",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("gen")));
    assert_eq!(args.new_line, Some(NewLine::Crlf));
    assert_eq!(args.signature_style, Some(Style::Passthrough));
    assert_eq!(args.holder_name.as_deref(), Some("Narrow"));
    assert!(args.no_emit);
    assert_eq!(args.pretty, Some(false));
    assert_eq!(args.manifest, Some(std::path::PathBuf::from("types.json")));
}

#[test]
fn accepts_kebab_case_aliases() {
    let args = CliArgs::try_parse_from([
        "checkt",
        "--out-dir",
        "gen",
        "--list-targets",
        "--show-config",
        "--signature-style",
        "wildcard",
        "-p",
        "project",
    ])
    .expect("aliases should parse");

    assert!(args.list_targets);
    assert!(args.show_config);
    assert_eq!(args.signature_style, Some(Style::Wildcard));
    assert_eq!(args.project, Some(std::path::PathBuf::from("project")));
}

#[test]
fn rejects_unknown_signature_style() {
    assert!(CliArgs::try_parse_from(["checkt", "--signatureStyle", "loose"]).is_err());
}

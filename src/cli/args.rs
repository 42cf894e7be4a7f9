use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the checkt binary.
#[derive(Parser, Debug)]
#[command(
    name = "checkt",
    version,
    about = "Generate witness-checked narrowing casts and identity containers from a type manifest"
)]
pub struct CliArgs {
    // ==================== Command-line Only Options ====================
    /// Print the final configuration instead of generating.
    #[arg(long = "showConfig", alias = "show-config")]
    pub show_config: bool,

    /// Print the targets that would be generated and then stop processing.
    #[arg(long = "listTargets", alias = "list-targets")]
    pub list_targets: bool,

    /// Path to checkt.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    // ==================== Emit ====================
    /// Specify an output folder for all generated sources.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Run generation and report diagnostics without writing any file.
    #[arg(long = "noEmit", alias = "no-emit")]
    pub no_emit: bool,

    /// Set the newline character for generated sources.
    #[arg(long = "newLine", alias = "new-line", value_enum)]
    pub new_line: Option<NewLine>,

    // ==================== Generation ====================
    /// How parameters a cast does not pin appear in its signature.
    #[arg(long = "signatureStyle", alias = "signature-style", value_enum)]
    pub signature_style: Option<Style>,

    /// Simple name of the generated per-namespace cast holder.
    #[arg(long = "holderName", alias = "holder-name")]
    pub holder_name: Option<String>,

    // ==================== Output Formatting ====================
    /// Enable color and formatting in diagnostics.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Type manifest to generate from.
    pub manifest: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum NewLine {
    /// Use carriage return followed by line feed (\\r\\n).
    Crlf,
    /// Use line feed only (\\n).
    Lf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Style {
    /// Quantify only pinned parameters; everything else is `?`.
    Wildcard,
    /// Quantify every parameter and pass unpinned ones through.
    Passthrough,
}

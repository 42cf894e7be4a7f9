#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use checkt::cli::args::CliArgs;
use checkt::cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_OUTPUTS_SKIPPED: i32 = 1;
const EXIT_DIAGNOSTICS_OUTPUTS_GENERATED: i32 = 2;

fn main() -> Result<()> {
    // Zero cost unless CHECKT_LOG or RUST_LOG is set.
    checkt::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    if args.show_config {
        let (config, _) = driver::effective_config(&args, &cwd)?;
        let json = serde_json::to_string_pretty(&config).context("failed to render config")?;
        println!("{json}");
        return Ok(());
    }

    let result = driver::run(&args, &cwd, !args.list_targets)?;

    if args.list_targets {
        for target in &result.targets {
            println!("{}\t{}", target.name, target.path.display());
        }
    }

    if !result.diagnostics.is_empty() {
        let pretty = args
            .pretty
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        let output = Reporter::new(pretty).render(&result.diagnostics);
        eprint!("{output}");
    }

    if result.has_errors() {
        if args.no_emit || args.list_targets || !result.emitted_files.is_empty() {
            std::process::exit(EXIT_DIAGNOSTICS_OUTPUTS_GENERATED);
        } else {
            std::process::exit(EXIT_DIAGNOSTICS_OUTPUTS_SKIPPED);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

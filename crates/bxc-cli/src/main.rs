//! # bxc CLI entry point
//!
//! Parses command-line arguments, configures logging, and runs the
//! compile pipeline.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bxc_cli::compile::{run_compile, CompileArgs};

/// bx attribute compiler.
///
/// Compiles a node attribute snippet into the engine's attribute
/// registration header and the scene editor's XML Schema.
#[derive(Parser, Debug)]
#[command(name = "bxc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    compile: CompileArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(input = %cli.compile.input.display(), "bxc starting");

    match run_compile(&cli.compile) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

//! unitypack CLI: extract, build and inspect Unity asset packages.
//!
//! - `unitypack extract <package> [-o dir]`
//! - `unitypack build <folder> <output> [-c cover.png]`
//! - `unitypack list <package> [--json]`
//!
//! Progress is logged through `tracing` to stderr; `-v`/`-q` or `RUST_LOG`
//! select how much. Results go to stdout.

mod commands;
mod format;
mod parse;

use std::process;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use unitypack::{Package, TracingObserver};

use commands::build_cli;
use format::{format_build_report, format_extract_report, format_listing, OutputMode};
use parse::{log_level, matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(&matches))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    };

    tracing::debug!("Running {:?}", action);
    process::exit(run(action));
}

/// Run one action, print its outcome line and return the exit code.
fn run(action: CliAction) -> i32 {
    match action {
        CliAction::Extract {
            package,
            output,
            options,
        } => {
            let result = Package::new(&package)
                .extract_with(&output, &options, &mut TracingObserver::new())
                .with_context(|| format!("extracting {}", package.display()));
            finish(result.map(|r| format_extract_report(&r)), "Extracted successfully.", "Failed to extract.")
        }
        CliAction::Build {
            folder,
            output,
            cover,
            options,
        } => {
            let result = Package::build_with(
                &folder,
                &output,
                cover.as_deref(),
                &options,
                &mut TracingObserver::new(),
            )
            .with_context(|| format!("building from {}", folder.display()));
            finish(result.map(|r| format_build_report(&r)), "Built successfully.", "Failed to build.")
        }
        CliAction::List { package, json } => {
            let mode = if json { OutputMode::Json } else { OutputMode::Human };
            match Package::new(&package)
                .list()
                .with_context(|| format!("listing {}", package.display()))
            {
                Ok(listing) => {
                    println!("{}", format_listing(&listing, mode));
                    0
                }
                Err(e) => {
                    eprintln!("(error) {:#}", e);
                    println!("Failed to list.");
                    1
                }
            }
        }
    }
}

fn finish(result: anyhow::Result<String>, success: &str, failure: &str) -> i32 {
    match result {
        Ok(details) => {
            println!("{}", details);
            println!("{}", success);
            0
        }
        Err(e) => {
            eprintln!("(error) {:#}", e);
            println!("{}", failure);
            1
        }
    }
}

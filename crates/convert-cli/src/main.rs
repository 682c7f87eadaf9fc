//! PHP function converter
//!
//! Converts the function code in a workspace into a Composer application,
//! in place, with the Function Invoker installed as a dependency.

mod cli;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use convert_core::{Converter, SystemRunner};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;

    println!("Converting PHP function to application...");

    let config = cli.resolve_config()?;
    let root = workspace_root(cli.workspace.as_ref())?;

    let converter = Converter::new(config, SystemRunner)?;
    let report = converter.run(&root)?;
    tracing::debug!(
        router = %report.router.display(),
        moved = report.relocation.entries.len(),
        "conversion finished"
    );

    println!(
        "{}",
        "Successfully converted PHP function to application.".green()
    );
    Ok(())
}

fn workspace_root(workspace: Option<&PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => dunce::canonicalize(path).map_err(|source| CliError::Workspace {
            path: path.clone(),
            source,
        }),
        None => Ok(std::env::current_dir()?),
    }
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use convert_core::{ConvertConfig, ExistingDependencyPolicy};

use crate::error::Result;

/// Convert a PHP function in a workspace into a Composer application
///
/// Registers the Function Invoker as a path repository in composer.json,
/// moves the user code into app/, copies the invoker tree into invoker/
/// and installs it with Composer.
#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Workspace to convert (defaults to the current directory)
    #[arg(short, long, env = "CONVERTER_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// TOML file overriding the built-in settings
    #[arg(short, long, env = "CONVERTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Composer executable
    #[arg(long, env = "CONVERTER_COMPOSER")]
    pub composer: Option<PathBuf>,

    /// Pre-built Function Invoker tree to copy into the workspace
    #[arg(long, env = "CONVERTER_INVOKER_SOURCE")]
    pub invoker_source: Option<PathBuf>,

    /// Abort if the project already requires the invoker package
    #[arg(long)]
    pub fail_on_existing_invoker: bool,
}

impl Cli {
    /// Build the effective configuration: defaults, then the config file,
    /// then command-line flags.
    pub fn resolve_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::load(path)?,
            None => ConvertConfig::default(),
        };

        if let Some(composer) = &self.composer {
            config.composer_program = composer.clone();
        }
        if let Some(source) = &self.invoker_source {
            config.invoker_source = source.clone();
        }
        if self.fail_on_existing_invoker {
            config.existing_dependency = ExistingDependencyPolicy::Fail;
        }

        Ok(config)
    }
}

//! End-to-end conversion of a workspace.

use std::path::{Path, PathBuf};

use convert_fs::{Relocation, move_to_subdirectory};

use crate::config::{ConvertConfig, ExistingDependencyPolicy};
use crate::install;
use crate::manifest::{AugmentOutcome, add_custom_repositories};
use crate::runner::CommandRunner;
use crate::{Error, Result, Step};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// How composer.json was changed
    pub manifest: AugmentOutcome,
    /// Where the user code went
    pub relocation: Relocation,
    /// Where the invoker tree was copied to
    pub invoker_dir: PathBuf,
    /// The router script Composer installed
    pub router: PathBuf,
}

/// Converts a PHP function workspace into a Composer application in place.
///
/// Steps run strictly in order and stop at the first failure. Nothing that
/// already happened is undone: a failed copy leaves the relocated `app/`
/// directory behind.
pub struct Converter<R> {
    config: ConvertConfig,
    runner: R,
}

impl<R: CommandRunner> Converter<R> {
    /// Create a converter after validating `config`.
    pub fn new(config: ConvertConfig, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    /// Convert the workspace at `root`.
    pub fn run(&self, root: &Path) -> Result<ConversionReport> {
        tracing::info!(root = %root.display(), "converting PHP function to application");

        // Under the fail policy nothing may be touched before the check. An
        // unreadable manifest is reported as the repository step it blocks.
        if self.config.existing_dependency == ExistingDependencyPolicy::Fail {
            install::check_existing_dependency(&self.config, root).map_err(|e| match e {
                Error::DependencyAlreadyDeclared { .. } => e.during(Step::CheckDependencies),
                other => other.during(Step::AddRepositories),
            })?;
        }

        let manifest = add_custom_repositories(root, &self.config.repository_entry())
            .map_err(|e| e.during(Step::AddRepositories))?;

        let relocation = move_to_subdirectory(root, &self.config.app_dir)
            .map_err(|e| Error::from(e).during(Step::MoveUserCode))?;

        let invoker_dir = install::copy_invoker(&self.runner, &self.config, root)
            .map_err(|e| e.during(Step::CopyInvoker))?;

        let app_dir = relocation.target.clone();
        if self.config.existing_dependency == ExistingDependencyPolicy::Allow {
            install::check_existing_dependency(&self.config, &app_dir)
                .map_err(|e| e.during(Step::CheckDependencies))?;
        }

        install::require_invoker(&self.runner, &self.config, &app_dir).map_err(|e| match e {
            Error::Launch { .. } => e.during(Step::RunComposer),
            other => other.during(Step::InstallInvoker),
        })?;

        Ok(ConversionReport {
            manifest,
            relocation,
            invoker_dir,
            router: self.config.router_path(root),
        })
    }
}

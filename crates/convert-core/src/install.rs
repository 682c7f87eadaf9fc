//! Vendoring and installing the Function Invoker.

use std::path::{Path, PathBuf};

use crate::config::{ConvertConfig, ExistingDependencyPolicy};
use crate::manifest::ComposerManifest;
use crate::runner::{CommandRunner, CommandSpec, run_checked};
use crate::{Error, Result};

/// Copy the pre-built invoker tree into the workspace root.
///
/// Runs `<copy_program> -r <invoker_source> <invoker_dir>` with `root` as the
/// working directory and returns the destination path.
pub fn copy_invoker(
    runner: &dyn CommandRunner,
    config: &ConvertConfig,
    root: &Path,
) -> Result<PathBuf> {
    let spec = CommandSpec::new(&config.copy_program, root)
        .arg("-r")
        .arg(config.invoker_source.to_string_lossy())
        .arg(config.invoker_dir.as_str());
    run_checked(runner, &spec)?;

    let destination = config.invoker_path(root);
    tracing::info!(destination = %destination.display(), "copied Function Invoker");
    Ok(destination)
}

/// Ask Composer to require the invoker package from inside `app_dir`.
///
/// Composer runs non-interactively; its stderr is carried in
/// [`Error::CommandFailed`] when it exits non-zero.
pub fn require_invoker(
    runner: &dyn CommandRunner,
    config: &ConvertConfig,
    app_dir: &Path,
) -> Result<()> {
    let spec = CommandSpec::new(&config.composer_program, app_dir)
        .arg("-n")
        .arg("require")
        .arg(config.invoker_package.as_str());
    run_checked(runner, &spec)?;

    tracing::info!(package = %config.invoker_package, "installed Function Invoker");
    Ok(())
}

/// Apply the existing-dependency policy to the manifest in `dir`.
///
/// With [`ExistingDependencyPolicy::Allow`] a pre-existing declaration is
/// only logged; Composer will update it in place.
pub fn check_existing_dependency(config: &ConvertConfig, dir: &Path) -> Result<()> {
    let Some(manifest) = ComposerManifest::load(dir)? else {
        return Ok(());
    };
    let Some(section) = manifest.declared_in(&config.invoker_package) else {
        return Ok(());
    };

    match config.existing_dependency {
        ExistingDependencyPolicy::Allow => {
            tracing::warn!(
                package = %config.invoker_package,
                section,
                "invoker is already a direct dependency and may be updated"
            );
            Ok(())
        }
        ExistingDependencyPolicy::Fail => Err(Error::DependencyAlreadyDeclared {
            package: config.invoker_package.clone(),
            section,
        }),
    }
}

//! Converter configuration
//!
//! Defaults describe the converter image layout: the invoker tree staged at
//! `/invoker`, Composer at `/usr/local/bin/composer`, and user code moved to
//! `app/` beside a vendored `invoker/`. A TOML file may override any field.

use std::fs;
use std::path::{Path, PathBuf};

use convert_fs::{WorkspacePath, validate_dir_name};
use serde::{Deserialize, Serialize};

use crate::manifest::RepositoryEntry;
use crate::{Error, Result};

/// What to do when the user project already requires the invoker package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingDependencyPolicy {
    /// Proceed and let Composer update the existing declaration
    #[default]
    Allow,
    /// Abort the conversion before anything is modified
    Fail,
}

/// Settings for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Directory the user code is moved into
    pub app_dir: String,
    /// Directory the invoker tree is copied into
    pub invoker_dir: String,
    /// Pre-built invoker tree to copy
    pub invoker_source: PathBuf,
    /// Recursive copy program, invoked as `<program> -r <source> <dest>`
    pub copy_program: PathBuf,
    /// Composer executable
    pub composer_program: PathBuf,
    /// Package name of the invoker
    pub invoker_package: String,
    /// Repository URL, relative to the app directory. Follows `invoker_dir`
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Whether Composer may symlink the invoker instead of copying it
    pub repository_symlink: bool,
    pub existing_dependency: ExistingDependencyPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            app_dir: WorkspacePath::AppDir.to_string(),
            invoker_dir: WorkspacePath::InvokerDir.to_string(),
            invoker_source: PathBuf::from("/invoker"),
            copy_program: PathBuf::from("/bin/cp"),
            composer_program: PathBuf::from("/usr/local/bin/composer"),
            invoker_package: "google/function-invoker".to_string(),
            repository_url: None,
            repository_symlink: false,
            existing_dependency: ExistingDependencyPolicy::Allow,
        }
    }
}

impl ConvertConfig {
    /// Parse configuration from TOML content. Missing fields keep defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| convert_fs::Error::read(path, e))?;
        Self::parse(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Check that the configured names can be used inside a workspace.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.app_dir, &self.invoker_dir] {
            validate_dir_name(name).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?;
        }
        if self.app_dir == self.invoker_dir {
            return Err(Error::InvalidConfig {
                message: format!(
                    "app_dir and invoker_dir must differ, both are '{}'",
                    self.app_dir
                ),
            });
        }

        let valid_package = self
            .invoker_package
            .split_once('/')
            .is_some_and(|(vendor, name)| {
                !vendor.is_empty() && !name.is_empty() && !name.contains('/')
            });
        if !valid_package {
            return Err(Error::InvalidConfig {
                message: format!(
                    "invoker_package '{}' must have the form vendor/name",
                    self.invoker_package
                ),
            });
        }
        Ok(())
    }

    /// URL of the invoker repository as seen from the app directory.
    pub fn repository_url(&self) -> String {
        self.repository_url
            .clone()
            .unwrap_or_else(|| format!("../{}", self.invoker_dir))
    }

    /// The repository declaration added to composer.json.
    pub fn repository_entry(&self) -> RepositoryEntry {
        RepositoryEntry::path(self.repository_url(), self.repository_symlink)
    }

    /// Where the relocated user code ends up under `root`.
    pub fn app_path(&self, root: &Path) -> PathBuf {
        root.join(&self.app_dir)
    }

    /// Where the invoker tree is copied to under `root`.
    pub fn invoker_path(&self, root: &Path) -> PathBuf {
        root.join(&self.invoker_dir)
    }

    /// Location of the installed invoker router script under `root`.
    pub fn router_path(&self, root: &Path) -> PathBuf {
        let mut path = self.app_path(root).join("vendor");
        path.extend(self.invoker_package.split('/'));
        path.join("router.php")
    }
}

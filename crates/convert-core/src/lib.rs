//! Conversion of PHP function sources into a Composer application
//!
//! The conversion runs three steps against an explicit workspace root:
//!
//! 1. [`manifest::add_custom_repositories`] registers the vendored invoker as
//!    a path repository in `composer.json`
//! 2. [`convert_fs::move_to_subdirectory`] moves the user code into `app/`
//! 3. [`install`] copies the invoker tree beside `app/` and asks Composer to
//!    require it
//!
//! [`Converter`] wires the steps together. External programs are reached
//! through the [`CommandRunner`] trait so the orchestration can be exercised
//! without real tools.

pub mod config;
pub mod converter;
pub mod error;
pub mod install;
pub mod manifest;
pub mod runner;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{ConvertConfig, ExistingDependencyPolicy};
pub use converter::{ConversionReport, Converter};
pub use error::{Error, Result, Step};
pub use manifest::{AugmentOutcome, ComposerManifest, RepositoryEntry, RepositoryOptions};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};

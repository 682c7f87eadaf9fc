//! Composer manifest handling
//!
//! The manifest is kept as an insertion-ordered map of opaque JSON values so
//! that unknown keys and their order survive a rewrite untouched. Only the
//! `repositories` list is interpreted, and only to append one typed
//! [`RepositoryEntry`].

use std::path::Path;

use convert_fs::{WorkspacePath, io};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Top-level manifest key holding repository declarations.
pub const REPOSITORIES_KEY: &str = "repositories";

/// Manifest sections that declare direct dependencies.
const REQUIRE_SECTIONS: [&str; 2] = ["require", "require-dev"];

/// `options` object of a path repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOptions {
    /// Whether Composer may symlink the package instead of copying it
    pub symlink: bool,
}

/// A Composer repository declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub options: RepositoryOptions,
}

impl RepositoryEntry {
    /// A `path` repository pointing at `url`.
    pub fn path(url: impl Into<String>, symlink: bool) -> Self {
        Self {
            kind: "path".to_string(),
            url: url.into(),
            options: RepositoryOptions { symlink },
        }
    }
}

impl Default for RepositoryEntry {
    fn default() -> Self {
        Self::path("../invoker", false)
    }
}

/// What [`add_custom_repositories`] did to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentOutcome {
    /// No manifest existed; a fresh one was written
    Created,
    /// The manifest had no repositories key; it was added
    KeyAdded,
    /// The entry was appended after `existing` declarations
    Appended { existing: usize },
}

/// A parsed `composer.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerManifest {
    fields: Map<String, Value>,
}

impl ComposerManifest {
    /// Parse a manifest from JSON text.
    ///
    /// The document must be a JSON object.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| Error::ManifestFormat {
            message: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::ManifestFormat {
                message: format!("expected a JSON object, found {}", kind_of(&other)),
            }),
        }
    }

    /// Append `entry` to the repositories list, creating the list if absent.
    ///
    /// Leaves the manifest untouched when the existing value is not a list.
    pub fn add_repository(&mut self, entry: &RepositoryEntry) -> Result<AugmentOutcome> {
        let entry = serde_json::to_value(entry).map_err(Error::Serialize)?;

        match self.fields.get_mut(REPOSITORIES_KEY) {
            None => {
                self.fields
                    .insert(REPOSITORIES_KEY.to_string(), Value::Array(vec![entry]));
                Ok(AugmentOutcome::KeyAdded)
            }
            Some(Value::Array(list)) => {
                let existing = list.len();
                list.push(entry);
                Ok(AugmentOutcome::Appended { existing })
            }
            Some(other) => Err(Error::RepositoriesNotList {
                found: kind_of(other),
            }),
        }
    }

    /// The section declaring `package` as a direct dependency, if any.
    pub fn declared_in(&self, package: &str) -> Option<&'static str> {
        REQUIRE_SECTIONS.into_iter().find(|section| {
            self.fields
                .get(*section)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(package))
        })
    }

    /// Serialize with Composer's four-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields
            .serialize(&mut serializer)
            .map_err(Error::Serialize)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| Error::ManifestFormat {
            message: e.to_string(),
        })
    }

    /// Read `composer.json` from `dir`, or `None` if there is none.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(WorkspacePath::Manifest);
        io::read_optional(&path)?
            .map(|content| Self::parse(&content))
            .transpose()
    }

    /// Overwrite `composer.json` in `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = self.to_json_string()?;
        io::write_file(&dir.join(WorkspacePath::Manifest), content.as_bytes())?;
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Register `entry` as a repository in `composer.json` under `root`.
///
/// A missing manifest is created holding only the repositories list. The
/// file is left as it was when it cannot be parsed or when its repositories
/// field is not a list.
pub fn add_custom_repositories(root: &Path, entry: &RepositoryEntry) -> Result<AugmentOutcome> {
    let (mut manifest, created) = match ComposerManifest::load(root)? {
        Some(manifest) => (manifest, false),
        None => (ComposerManifest::default(), true),
    };

    let outcome = manifest.add_repository(entry)?;
    manifest.save(root)?;

    let outcome = if created {
        AugmentOutcome::Created
    } else {
        outcome
    };
    tracing::info!(?outcome, url = %entry.url, "registered invoker repository");
    Ok(outcome)
}

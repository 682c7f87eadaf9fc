//! Staged relocation of a directory's contents into a subdirectory
//!
//! The top level of the workspace is snapshotted first, then a uniquely
//! named staging directory is created next to the entries, every entry is
//! renamed into it, and finally the staging directory is renamed to the
//! target name. Listing before the staging directory exists keeps the
//! staging directory out of its own snapshot.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Outcome of a successful [`move_to_subdirectory`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Final location of the relocated entries
    pub target: PathBuf,
    /// Base names of the entries that were moved, sorted
    pub entries: Vec<OsString>,
}

/// Check that `name` is usable as a single directory name inside a workspace.
pub fn validate_dir_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a relative directory")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// List the top-level entries of `root`, sorted by name.
fn snapshot(root: &Path) -> Result<Vec<OsString>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| Error::read(root, e))? {
        let entry = entry.map_err(|e| Error::read(root, e))?;
        entries.push(entry.file_name());
    }
    entries.sort();
    Ok(entries)
}

/// Move every top-level entry of `root` into a new subdirectory `name`.
///
/// There is no rollback: if a rename fails, the entries moved so far stay
/// in the staging directory and the error is returned.
pub fn move_to_subdirectory(root: &Path, name: &str) -> Result<Relocation> {
    validate_dir_name(name)?;

    let entries = snapshot(root)?;

    let staging = tempfile::Builder::new()
        .prefix(name)
        .tempdir_in(root)
        .map_err(|e| Error::write(root.join(name), e))?
        .keep();
    tracing::debug!(staging = %staging.display(), "created staging directory");

    for entry in &entries {
        let from = root.join(entry);
        let to = staging.join(entry);
        fs::rename(&from, &to).map_err(|source| Error::Rename {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        tracing::debug!(entry = %Path::new(entry).display(), "moved entry");
    }

    let target = root.join(name);
    fs::rename(&staging, &target).map_err(|source| Error::Rename {
        from: staging.clone(),
        to: target.clone(),
        source,
    })?;

    tracing::info!(target = %target.display(), count = entries.len(), "relocated workspace");
    Ok(Relocation { target, entries })
}

//! Plain file I/O for workspace manifests

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::{Error, Result};

/// Permission bits applied when a file is created.
#[cfg(unix)]
const CREATE_MODE: u32 = 0o644;

/// Read a text file, treating a missing file as `None`.
///
/// Any other failure (permissions, a directory in the way, invalid UTF-8)
/// is reported as [`Error::Read`].
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::read(path, e)),
    }
}

/// Overwrite `path` with `content`.
///
/// This is a plain truncate-and-write: no temp file, no rename, no backup of
/// the previous content. A newly created file gets mode `0644` on Unix;
/// existing files keep their permissions.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CREATE_MODE);
    }

    let mut file = options.open(path).map_err(|e| Error::write(path, e))?;
    file.write_all(content).map_err(|e| Error::write(path, e))?;
    file.flush().map_err(|e| Error::write(path, e))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

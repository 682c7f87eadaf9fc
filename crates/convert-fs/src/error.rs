//! Error types for convert-fs

use std::path::PathBuf;

/// Result type for convert-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convert-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or directory listing could not be read
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file, directory or rename could not be written
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be moved into the staging directory
    #[error("could not move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory name is not a single usable path component
    #[error("invalid directory name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

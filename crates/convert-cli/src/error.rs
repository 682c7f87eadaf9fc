//! Error types for convert-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from convert-core
    #[error(transparent)]
    Core(#[from] convert_core::Error),

    /// The workspace directory could not be resolved
    #[error("could not open workspace {path}: {source}")]
    Workspace {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed
    #[error("could not initialize logging: {message}")]
    Logging { message: String },
}

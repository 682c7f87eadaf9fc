//! Well-known names inside a workspace being converted.

use std::path::Path;

/// Standard workspace filesystem names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePath {
    /// The Composer manifest (`composer.json`)
    Manifest,
    /// The `app` directory holding the relocated user code
    AppDir,
    /// The `invoker` directory holding the vendored Function Invoker
    InvokerDir,
}

impl WorkspacePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "composer.json",
            Self::AppDir => "app",
            Self::InvokerDir => "invoker",
        }
    }
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

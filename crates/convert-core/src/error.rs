//! Error types for convert-core

use std::path::PathBuf;

/// Result type for convert-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Conversion step an error happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Looking for an existing invoker requirement
    CheckDependencies,
    /// Registering the invoker repository in composer.json
    AddRepositories,
    /// Moving user code into the app directory
    MoveUserCode,
    /// Copying the invoker tree into the workspace
    CopyInvoker,
    /// Launching Composer
    RunComposer,
    /// Composer resolving and installing the invoker
    InstallInvoker,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::CheckDependencies => "refusing to install Function Invoker",
            Self::AddRepositories => "could not add custom repositories",
            Self::MoveUserCode => "could not move user code to new location",
            Self::CopyInvoker => "could not copy Function Invoker",
            Self::RunComposer => "could not run Composer",
            Self::InstallInvoker => "could not install Function Invoker",
        };
        f.write_str(text)
    }
}

/// Errors that can occur in convert-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from convert-fs
    #[error(transparent)]
    Fs(#[from] convert_fs::Error),

    /// composer.json exists but is not a JSON object
    #[error("composer.json is not a valid manifest: {message}")]
    ManifestFormat { message: String },

    /// The repositories field holds something other than a list
    #[error("repositories field of composer.json must be a list, found {found}")]
    RepositoriesNotList { found: &'static str },

    /// The manifest could not be serialized back to JSON
    #[error("could not serialize composer.json: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An external program could not be started
    #[error("could not launch {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external program ran and reported failure
    #[error("{} {}\nSTDERR:\n{stderr}", .program.display(), describe_exit(.code))]
    CommandFailed {
        program: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The configuration file could not be parsed
    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The configuration has an unusable value
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The invoker package is already a direct dependency of the user project
    #[error("{package} is already declared in the {section} section of composer.json")]
    DependencyAlreadyDeclared {
        package: String,
        section: &'static str,
    },

    /// An error annotated with the conversion step it happened in
    #[error("{step}: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the conversion step this error happened in.
    pub fn during(self, step: Step) -> Self {
        Self::Step {
            step,
            source: Box::new(self),
        }
    }

    /// The step this error was attributed to, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The error without its step annotation.
    pub fn root(&self) -> &Error {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

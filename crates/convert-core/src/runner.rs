//! External program execution
//!
//! Conversion drives two external tools (a recursive copy and Composer).
//! Both go through [`CommandRunner`], which takes an explicit working
//! directory per command instead of relying on the process-wide one.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl CommandSpec {
    /// Invoke `program` with no arguments in `current_dir`.
    pub fn new(program: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The program's file name, used in log lines.
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion.
///
/// An `Err` means the program could not be started at all. A program that
/// started and failed is an `Ok` with a non-zero [`CommandOutput::code`].
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        (**self).run(spec)
    }
}

/// [`CommandRunner`] backed by real child processes.
///
/// Stdin and stdout are closed, stderr is captured. There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `spec` and turn launch failures and non-zero exits into errors.
pub fn run_checked(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<CommandOutput> {
    tracing::debug!(command = %spec, cwd = %spec.current_dir.display(), "running command");

    let output = runner.run(spec).map_err(|source| Error::Launch {
        program: spec.program.clone(),
        source,
    })?;

    if !output.success() {
        return Err(Error::CommandFailed {
            program: spec.program.clone(),
            code: output.code,
            stderr: output.stderr,
        });
    }

    tracing::debug!(program = %spec.name(), "command succeeded");
    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_system_runner_captures_stderr() {
        let temp = TempDir::new().unwrap();
        let spec = CommandSpec::new("/bin/sh", temp.path())
            .arg("-c")
            .arg("echo broken >&2; exit 3");

        let output = SystemRunner.run(&spec).unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "broken");
    }

    #[test]
    fn test_system_runner_uses_current_dir() {
        let temp = TempDir::new().unwrap();
        let spec = CommandSpec::new("/bin/sh", temp.path())
            .arg("-c")
            .arg("touch marker");

        let output = SystemRunner.run(&spec).unwrap();

        assert!(output.success());
        assert!(temp.path().join("marker").exists());
    }

    #[test]
    fn test_run_checked_missing_program_is_launch_error() {
        let temp = TempDir::new().unwrap();
        let spec = CommandSpec::new(temp.path().join("no-such-tool"), temp.path());

        let err = run_checked(&SystemRunner, &spec).unwrap_err();

        assert!(matches!(err, Error::Launch { .. }));
    }

    #[test]
    fn test_run_checked_non_zero_is_command_failed() {
        let temp = TempDir::new().unwrap();
        let spec = CommandSpec::new("/bin/sh", temp.path())
            .arg("-c")
            .arg("echo nope >&2; exit 1");

        let err = run_checked(&SystemRunner, &spec).unwrap_err();

        match err {
            Error::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr.trim(), "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_joins_args() {
        let spec = CommandSpec::new("/usr/local/bin/composer", "/workspace/app")
            .arg("-n")
            .arg("require")
            .arg("google/function-invoker");
        assert_eq!(
            spec.to_string(),
            "/usr/local/bin/composer -n require google/function-invoker"
        );
        assert_eq!(spec.name(), "composer");
    }
}

//! Test doubles for conversion tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::runner::{CommandOutput, CommandRunner, CommandSpec};

type Effect = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// A [`CommandRunner`] that records invocations instead of spawning them.
///
/// Commands are matched by program file name (`cp`, `composer`). Unless
/// configured otherwise every command succeeds with empty stderr.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failures: HashMap<String, CommandOutput>,
    missing: Vec<String>,
    effects: HashMap<String, Effect>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` exit with `code` and `stderr`.
    pub fn fail_on(mut self, name: &str, code: i32, stderr: &str) -> Self {
        self.failures.insert(
            name.to_string(),
            CommandOutput {
                code: Some(code),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Make `name` fail to launch.
    pub fn missing(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    /// Run `effect` whenever `name` is invoked, before reporting its result.
    pub fn on_run(
        mut self,
        name: &str,
        effect: impl Fn(&CommandSpec) + Send + Sync + 'static,
    ) -> Self {
        self.effects.insert(name.to_string(), Box::new(effect));
        self
    }

    /// Every recorded invocation, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Names of the invoked programs, in order.
    pub fn names(&self) -> Vec<String> {
        self.calls().iter().map(CommandSpec::name).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }

        let name = spec.name();
        if self.missing.contains(&name) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", name),
            ));
        }
        if let Some(effect) = self.effects.get(&name) {
            effect(spec);
        }
        Ok(self.failures.get(&name).cloned().unwrap_or_else(|| CommandOutput {
            code: Some(0),
            ..Default::default()
        }))
    }
}

//! External command execution
//!
//! Every git, package-manager and project script invocation made during a
//! release goes through the [CommandRunner] trait, so the pipeline can be
//! driven by a real shell or by a recording double in tests.
//!
//! - [executor::ShellExecutor]: runs commands through `sh -c`
//! - [mock::RecordingRunner]: records commands and replays scripted output

pub mod executor;
pub mod mock;

pub use executor::ShellExecutor;
pub use mock::RecordingRunner;

use std::borrow::Cow;

use crate::error::Result;

/// Whether a command and its output are echoed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Print a header with the command followed by its captured output
    Loud,
    /// Print nothing; used for identity reads and registry queries
    Silent,
}

/// Captured standard output of a completed command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellResult {
    pub stdout: String,
}

impl ShellResult {
    pub fn new(stdout: impl Into<String>) -> Self {
        ShellResult {
            stdout: stdout.into(),
        }
    }

    /// Stdout with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Runs a single external command to completion.
///
/// Implementations block until the command exits. A spawn failure or a
/// non-zero exit status is returned as [crate::error::ReleaseError::Command];
/// callers treat it as fatal.
pub trait CommandRunner: Send + Sync {
    /// Run `command` and capture its standard output
    fn run(&self, command: &str, echo: Echo) -> Result<ShellResult>;
}

/// Quote a value for interpolation into a shell command line.
///
/// Refs, versions and package specs come back unchanged; anything with
/// whitespace or shell metacharacters is quoted by `shlex`. A value holding a
/// NUL byte cannot be passed to a shell and is rejected.
pub fn quote(value: &str) -> Result<Cow<'_, str>> {
    Ok(shlex::try_quote(value)?)
}

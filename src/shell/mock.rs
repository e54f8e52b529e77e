use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::shell::{CommandRunner, Echo, ShellResult};

/// Command runner that records invocations instead of spawning processes
///
/// Unscripted commands succeed with empty output. Responses and failures are
/// matched by command prefix, so `git commit` matches the full commit line.
pub struct RecordingRunner {
    responses: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<(String, Echo)>>,
}

impl RecordingRunner {
    /// Create a runner with no scripted behaviour
    pub fn new() -> Self {
        RecordingRunner {
            responses: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Return `stdout` for any command starting with `prefix`
    pub fn respond(&mut self, prefix: impl Into<String>, stdout: impl Into<String>) {
        self.responses.insert(prefix.into(), stdout.into());
    }

    /// Fail any command starting with `prefix`
    pub fn fail(&mut self, prefix: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(prefix.into(), message.into());
    }

    /// All commands run so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.lock_calls().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Commands that were run with [Echo::Silent]
    pub fn silent_commands(&self) -> Vec<String> {
        self.lock_calls()
            .iter()
            .filter(|(_, echo)| *echo == Echo::Silent)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Position of the first command starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.lock_calls()
            .iter()
            .position(|(c, _)| c.starts_with(prefix))
    }

    pub fn ran(&self, prefix: &str) -> bool {
        self.position(prefix).is_some()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(String, Echo)>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn longest_match<'a>(map: &'a HashMap<String, String>, command: &str) -> Option<&'a String> {
        map.iter()
            .filter(|(prefix, _)| command.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, value)| value)
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, echo: Echo) -> Result<ShellResult> {
        self.lock_calls().push((command.to_string(), echo));

        if let Some(message) = Self::longest_match(&self.failures, command) {
            return Err(ReleaseError::command(command, message.clone()));
        }

        let stdout = Self::longest_match(&self.responses, command)
            .cloned()
            .unwrap_or_default();
        Ok(ShellResult::new(stdout))
    }
}

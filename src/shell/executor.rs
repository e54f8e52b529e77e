use std::path::PathBuf;
use std::process::Command;

use crate::error::{ReleaseError, Result};
use crate::shell::{CommandRunner, Echo, ShellResult};
use crate::ui;

/// Executes release commands through the system shell
pub struct ShellExecutor {
    working_dir: PathBuf,
}

impl ShellExecutor {
    /// Create an executor that runs every command inside `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        ShellExecutor {
            working_dir: working_dir.into(),
        }
    }
}

impl CommandRunner for ShellExecutor {
    /// Execute a command line with `sh -c`
    ///
    /// If the command exits with code 0 its stdout is returned. Any non-zero
    /// exit code is treated as a failure, and the error carries both streams.
    ///
    /// # Arguments
    /// * `command` - Full command line, already quoted
    /// * `echo` - Whether to print the command and its output
    ///
    /// # Returns
    /// * `Ok(ShellResult)` if the command succeeds (exit code 0)
    /// * `Err` if the shell cannot be spawned or the command fails
    fn run(&self, command: &str, echo: Echo) -> Result<ShellResult> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| ReleaseError::command(command, format!("failed to spawn: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::command(
                command,
                format!(
                    "exit code {}\nStdout: {}\nStderr: {}",
                    output.status.code().unwrap_or(-1),
                    stdout.trim_end(),
                    stderr.trim_end()
                ),
            ));
        }

        if echo == Echo::Loud {
            ui::display_command(command, &stdout);
        }

        Ok(ShellResult::new(stdout))
    }
}

//! Shell executor backed by `std::process::Command`.
//!
//! Commands come from local plugin files and run without escaping. Do not
//! route untrusted input through here.

use std::process::Command;
use std::process::Stdio;

use tracing::debug;

use crate::usecases::ports::ShellError;
use crate::usecases::ports::ShellOutput;
use crate::usecases::ports::ShellRunner;

#[cfg(windows)]
const DEFAULT_SHELL: &str = "cmd";
#[cfg(not(windows))]
const DEFAULT_SHELL: &str = "sh";

/// Runs commands as `<shell> -c <command>` (`cmd /C` on Windows).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemShell {
    program: String,
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl SystemShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_flag(&self) -> &'static str {
        let name = std::path::Path::new(&self.program)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.program.as_str())
            .to_ascii_lowercase();
        if name == "cmd" { "/C" } else { "-c" }
    }
}

impl ShellRunner for SystemShell {
    fn run(&self, command: &str) -> Result<ShellOutput, ShellError> {
        debug!(shell = %self.program, command, "Running shell command");
        let output = Command::new(&self.program)
            .arg(self.command_flag())
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ShellError::Spawn {
                shell: self.program.clone(),
                source,
            })?;

        let result = ShellOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(exit_code = ?result.exit_code, "Shell command finished");
        Ok(result)
    }
}

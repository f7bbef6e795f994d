//! Port traits implemented by infrastructure adapters.

use std::io;

use thiserror::Error;

use crate::domain::ErrorCategory;

/// Captured result of one shell invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout on success, stderr otherwise.
    pub fn text(&self) -> &str {
        if self.success() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to start shell '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::External
    }

    pub fn suggestion(&self) -> String {
        match self {
            ShellError::Spawn { .. } => {
                "Check that the shell exists or set SPELL_CRAFT_SHELL to another interpreter."
                    .to_string()
            }
        }
    }
}

/// Runs a fully rendered command string through a shell.
pub trait ShellRunner {
    fn run(&self, command: &str) -> Result<ShellOutput, ShellError>;
}

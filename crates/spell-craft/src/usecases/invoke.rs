//! Runs a compiled command: render, execute, report.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::ArgumentValues;
use crate::domain::CompiledCommand;
use crate::domain::ErrorCategory;
use crate::domain::RenderError;
use crate::usecases::ports::ShellError;
use crate::usecases::ports::ShellOutput;
use crate::usecases::ports::ShellRunner;

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl InvokeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InvokeError::Render(e) => e.category(),
            InvokeError::Shell(e) => e.category(),
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            InvokeError::Render(e) => e.suggestion(),
            InvokeError::Shell(e) => e.suggestion(),
        }
    }
}

/// What happened when an incantation ran.
///
/// A failing child is not an error: its stderr is the output.
#[derive(Clone, Debug, Serialize)]
pub struct InvocationOutcome {
    pub plugin: String,
    pub command: String,
    pub rendered: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output: String,
}

impl InvocationOutcome {
    fn new(plugin: &str, command: &CompiledCommand, rendered: String, shell: ShellOutput) -> Self {
        Self {
            plugin: plugin.to_string(),
            command: command.name().to_string(),
            rendered,
            success: shell.success(),
            exit_code: shell.exit_code,
            output: shell.text().to_string(),
        }
    }
}

pub fn invoke<R: ShellRunner + ?Sized>(
    runner: &R,
    plugin: &str,
    command: &CompiledCommand,
    values: &ArgumentValues,
) -> Result<InvocationOutcome, InvokeError> {
    let rendered = command.render(values)?;
    let shell = runner.run(&rendered)?;
    let outcome = InvocationOutcome::new(plugin, command, rendered, shell);

    if outcome.success {
        info!(plugin, command = command.name(), "Incantation succeeded");
    } else {
        info!(
            plugin,
            command = command.name(),
            exit_code = ?outcome.exit_code,
            "Incantation failed; relaying stderr"
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Parameter;
    use crate::usecases::ports::test_support::RecordingShell;

    fn greet() -> CompiledCommand {
        CompiledCommand::new("greet", "echo hello {{ name }}", vec![Parameter::new("name")])
            .unwrap()
    }

    #[test]
    fn test_invoke_executes_rendered_string() {
        let shell = RecordingShell::answering(ShellOutput {
            exit_code: Some(0),
            stdout: "hello world\n".into(),
            stderr: String::new(),
        });
        let values: ArgumentValues = [("name".to_string(), "world".to_string())].into();

        let outcome = invoke(&shell, "greet", &greet(), &values).unwrap();

        assert_eq!(*shell.commands.borrow(), vec!["echo hello world".to_string()]);
        assert!(outcome.success);
        assert_eq!(outcome.output, "hello world\n");
        assert_eq!(outcome.rendered, "echo hello world");
        assert_eq!(outcome.plugin, "greet");
    }

    #[test]
    fn test_failed_child_relays_stderr() {
        let shell = RecordingShell::answering(ShellOutput {
            exit_code: Some(2),
            stdout: "partial".into(),
            stderr: "ls: cannot access\n".into(),
        });
        let values: ArgumentValues = [("name".to_string(), "x".to_string())].into();

        let outcome = invoke(&shell, "p", &greet(), &values).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(2));
        assert_eq!(outcome.output, "ls: cannot access\n");
    }

    #[test]
    fn test_render_failure_never_reaches_the_shell() {
        let shell = RecordingShell::default();
        let err = invoke(&shell, "p", &greet(), &ArgumentValues::new()).unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Render(RenderError::MissingParameter { .. })
        ));
        assert!(shell.commands.borrow().is_empty());
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
        assert_eq!(err.suggestion(), "Pass --name <VALUE>.");
    }
}

use serde::Serialize;

use crate::app::commands::OutputFormat;
use crate::domain::ErrorCategory;
use crate::domain::PluginError;
use crate::domain::RenderError;
use crate::usecases::InvokeError;
use crate::usecases::ShellError;

/// An error already formatted for the selected output mode.
#[derive(Debug)]
pub struct CliError {
    pub exit_code: i32,
    pub format: OutputFormat,
    pub message: String,
    pub json: Option<String>,
}

impl CliError {
    pub fn new(
        format: OutputFormat,
        message: impl Into<String>,
        json: Option<String>,
        exit_code: i32,
    ) -> Self {
        Self {
            exit_code,
            format,
            message: message.into(),
            json,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Category, message and suggestion of any domain error in an error chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    pub category: ErrorCategory,
    pub suggestion: String,
}

impl ErrorView {
    pub fn from_chain(error: &anyhow::Error) -> Option<Self> {
        if let Some(e) = find_error::<PluginError>(error) {
            return Some(Self::new(e.to_string(), e.category(), e.suggestion()));
        }
        if let Some(e) = find_error::<InvokeError>(error) {
            return Some(Self::new(e.to_string(), e.category(), e.suggestion()));
        }
        if let Some(e) = find_error::<RenderError>(error) {
            return Some(Self::new(e.to_string(), e.category(), e.suggestion()));
        }
        if let Some(e) = find_error::<ShellError>(error) {
            return Some(Self::new(e.to_string(), e.category(), e.suggestion()));
        }
        None
    }

    /// A usage error from the generated plugin tree, first paragraph only.
    pub fn usage(error: &clap::Error) -> Self {
        let rendered = error.to_string();
        let message = rendered
            .split("\n\n")
            .next()
            .unwrap_or_default()
            .trim()
            .trim_start_matches("error: ")
            .to_string();
        Self::new(
            message,
            ErrorCategory::InvalidInput,
            "Run the same command with --help to see its parameters.".to_string(),
        )
    }

    fn new(message: String, category: ErrorCategory, suggestion: String) -> Self {
        Self {
            message,
            category,
            suggestion,
        }
    }

    pub fn to_json_string(&self) -> String {
        #[derive(Serialize)]
        struct Payload<'a> {
            success: bool,
            error: &'a str,
            category: &'a str,
            suggestion: &'a str,
        }
        let payload = Payload {
            success: false,
            error: &self.message,
            category: self.category.as_str(),
            suggestion: &self.suggestion,
        };
        serde_json::to_string_pretty(&payload).unwrap_or_default()
    }
}

pub fn find_error<T: std::error::Error + 'static>(error: &anyhow::Error) -> Option<&T> {
    error.chain().find_map(|source| source.downcast_ref::<T>())
}

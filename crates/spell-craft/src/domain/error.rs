//! Plugin loading and rendering errors with categories and suggestions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad error classes used to pick an exit code and a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The user supplied bad arguments.
    InvalidInput,
    /// A plugin file exists but its content is wrong.
    InvalidData,
    /// A file or directory is missing.
    NotFound,
    /// The operating system refused an operation.
    External,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::InvalidData => "invalid_data",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::External => "external",
        }
    }
}

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Unsupported configuration format for {}: expected .json, .yaml or .yml", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Invalid configuration in {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Malformed command spec in plugin '{plugin}' at line {line}: {content:?} (expected name:template)")]
    MalformedSpec {
        plugin: String,
        line: usize,
        content: String,
    },

    #[error("Command '{name}' is defined more than once in plugin '{plugin}'")]
    DuplicateCommand { plugin: String, name: String },

    #[error("Invalid name {name:?} in command '{command}' of plugin '{plugin}': {reason}")]
    InvalidName {
        plugin: String,
        command: String,
        name: String,
        reason: &'static str,
    },

    #[error("Invalid template for command '{command}' in plugin '{plugin}': {source}")]
    Template {
        plugin: String,
        command: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Plugins directory not found: {}", path.display())]
    PluginsDirNotFound { path: PathBuf },
}

impl PluginError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PluginError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PluginError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            PluginError::Io { .. } => ErrorCategory::External,
            PluginError::PluginsDirNotFound { .. } => ErrorCategory::NotFound,
            PluginError::UnsupportedFormat { .. }
            | PluginError::Json { .. }
            | PluginError::Yaml { .. }
            | PluginError::InvalidConfig { .. }
            | PluginError::MalformedSpec { .. }
            | PluginError::DuplicateCommand { .. }
            | PluginError::InvalidName { .. }
            | PluginError::Template { .. } => ErrorCategory::InvalidData,
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            PluginError::UnsupportedFormat { .. } => {
                "Rename the configuration file to commands.json, commands.yaml or commands.yml."
                    .to_string()
            }
            PluginError::Io { .. } => "Check that the file exists and is readable.".to_string(),
            PluginError::Json { .. } | PluginError::Yaml { .. } => {
                "Fix the syntax error in the configuration file.".to_string()
            }
            PluginError::InvalidConfig { .. } => {
                "The configuration must map command names to {arguments: {param: {...}}}."
                    .to_string()
            }
            PluginError::MalformedSpec { .. } => {
                "Each line of commands.txt must look like name:template.".to_string()
            }
            PluginError::DuplicateCommand { .. } => {
                "Rename or remove one of the duplicate lines in commands.txt.".to_string()
            }
            PluginError::InvalidName { .. } => {
                "Rename it: `help` is taken by generated help and parameter names need a letter first."
                    .to_string()
            }
            PluginError::Template { .. } => {
                "Placeholders use the {{ name }} syntax; check for unbalanced braces.".to_string()
            }
            PluginError::PluginsDirNotFound { .. } => {
                "Pass an existing directory containing one folder per plugin.".to_string()
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing value for parameter '{name}' of command '{command}'")]
    MissingParameter { command: String, name: String },

    #[error("Failed to render command '{command}': {source}")]
    Render {
        command: String,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RenderError::MissingParameter { .. } => ErrorCategory::InvalidInput,
            RenderError::Render { .. } => ErrorCategory::InvalidData,
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            RenderError::MissingParameter { name, .. } => {
                format!("Pass --{} <VALUE>.", name)
            }
            RenderError::Render { .. } => {
                "Check the command template in commands.txt.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = PluginError::io(
            "plugins/demo/commands.txt",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("plugins/demo/commands.txt"));
    }

    #[test]
    fn test_permission_denied_is_external() {
        let err = PluginError::io(
            "plugins/demo/commands.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = PluginError::UnsupportedFormat {
            path: PathBuf::from("commands.toml"),
        };
        assert_eq!(err.category(), ErrorCategory::InvalidData);
        assert!(err.to_string().contains("commands.toml"));
        assert!(err.suggestion().contains("commands.json"));
    }

    #[test]
    fn test_missing_parameter_suggests_flag() {
        let err = RenderError::MissingParameter {
            command: "greet".into(),
            name: "name".into(),
        };
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
        assert_eq!(err.suggestion(), "Pass --name <VALUE>.");
        assert_eq!(
            err.to_string(),
            "Missing value for parameter 'name' of command 'greet'"
        );
    }

    #[test]
    fn test_category_strings() {
        assert_eq!(ErrorCategory::InvalidInput.as_str(), "invalid_input");
        assert_eq!(ErrorCategory::NotFound.as_str(), "not_found");
    }
}

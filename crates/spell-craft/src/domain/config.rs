//! Plugin configuration: command name to argument descriptions.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

const ARGUMENTS_KEY: &str = "arguments";
const HELP_KEY: &str = "help";

/// A string parameter of a compiled command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
        }
    }
}

/// Parsed `commands.{json,yaml,yml}` content.
///
/// Shape: `{ <command>: { arguments: { <param>: { ... } }, help?: str } }`.
/// Entries are optional; a command without one takes no parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandConfig {
    entries: Map<String, Value>,
}

impl CommandConfig {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn command(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Parameters declared under `<name>.arguments`, in file order.
    ///
    /// A missing entry, a missing `arguments` key or a non-mapping value all
    /// yield no parameters.
    pub fn parameters(&self, name: &str) -> Vec<Parameter> {
        let Some(arguments) = self
            .command(name)
            .and_then(|details| details.get(ARGUMENTS_KEY))
            .and_then(Value::as_object)
        else {
            return Vec::new();
        };

        arguments
            .iter()
            .map(|(param, metadata)| Parameter {
                name: param.clone(),
                help: help_text(metadata),
            })
            .collect()
    }

    /// Optional `<name>.help` used as the command's description.
    pub fn about(&self, name: &str) -> Option<String> {
        self.command(name).and_then(help_text)
    }
}

fn help_text(value: &Value) -> Option<String> {
    value
        .get(HELP_KEY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> CommandConfig {
        match value {
            Value::Object(map) => CommandConfig::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_parameters_follow_file_order() {
        let cfg = config(json!({
            "copy": {"arguments": {"source": {}, "destination": {}, "flags": {}}}
        }));
        let names: Vec<_> = cfg
            .parameters("copy")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["source", "destination", "flags"]);
    }

    #[test]
    fn test_missing_entry_means_no_parameters() {
        let cfg = config(json!({"other": {"arguments": {"x": {}}}}));
        assert!(cfg.parameters("list_files").is_empty());
        assert!(cfg.about("list_files").is_none());
    }

    #[test]
    fn test_missing_or_odd_arguments_are_tolerated() {
        let cfg = config(json!({
            "a": {},
            "b": {"arguments": null},
            "c": {"arguments": ["x", "y"]},
            "d": null
        }));
        for name in ["a", "b", "c", "d"] {
            assert!(cfg.parameters(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn test_help_metadata_is_read() {
        let cfg = config(json!({
            "list_files": {
                "help": "List a directory",
                "arguments": {
                    "directory": {"help": "Directory to list"},
                    "pattern": null
                }
            }
        }));
        let params = cfg.parameters("list_files");
        assert_eq!(params[0].help.as_deref(), Some("Directory to list"));
        assert_eq!(params[1], Parameter::new("pattern"));
        assert_eq!(cfg.about("list_files").as_deref(), Some("List a directory"));
    }

    #[test]
    fn test_blank_help_is_ignored() {
        let cfg = config(json!({"x": {"help": "   "}}));
        assert!(cfg.about("x").is_none());
    }
}

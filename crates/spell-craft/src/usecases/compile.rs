//! Command compiler: raw specs plus configuration into compiled commands.

use std::collections::HashSet;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::domain::CommandConfig;
use crate::domain::CommandSpec;
use crate::domain::CompiledCommand;
use crate::domain::Parameter;
use crate::domain::PluginError;

/// Clap owns `help` at every level of the generated tree.
const HELP_NAME: &str = "help";

/// Compiles every spec line of `plugin_name`.
///
/// Blank lines and `#` comments are skipped. Parameters come from
/// `configuration[<name>].arguments`; commands without an entry take none.
/// A command or parameter named `help`, and a blank or dash-led parameter
/// name, is an `InvalidName` error.
pub fn compile(
    plugin_name: &str,
    commands: &[String],
    configuration: &CommandConfig,
) -> Result<Vec<CompiledCommand>, PluginError> {
    let mut compiled = Vec::with_capacity(commands.len());
    let mut seen = HashSet::new();

    for (index, line) in commands.iter().enumerate() {
        if CommandSpec::is_ignorable(line) {
            trace!(plugin = plugin_name, line = index + 1, "Skipping blank or comment line");
            continue;
        }

        let spec = CommandSpec::parse(line).ok_or_else(|| PluginError::MalformedSpec {
            plugin: plugin_name.to_string(),
            line: index + 1,
            content: line.clone(),
        })?;

        if !seen.insert(spec.name.clone()) {
            return Err(PluginError::DuplicateCommand {
                plugin: plugin_name.to_string(),
                name: spec.name,
            });
        }

        if configuration.command(&spec.name).is_none() {
            debug!(
                plugin = plugin_name,
                command = %spec.name,
                "No configuration entry; command takes no parameters"
            );
        }

        let parameters = configuration.parameters(&spec.name);
        check_names(plugin_name, &spec.name, &parameters)?;

        let command = CompiledCommand::new(spec.name.clone(), spec.template, parameters)
        .map_err(|source| PluginError::Template {
            plugin: plugin_name.to_string(),
            command: spec.name.clone(),
            source,
        })?
        .with_about(configuration.about(&spec.name));

        let undeclared = command.undeclared_placeholders();
        if !undeclared.is_empty() {
            warn!(
                plugin = plugin_name,
                command = command.name(),
                placeholders = ?undeclared,
                "Template uses placeholders missing from the configuration; invocation will fail"
            );
        }

        compiled.push(command);
    }

    for name in configuration.as_map().keys() {
        if !seen.contains(name) {
            debug!(plugin = plugin_name, command = %name, "Configured command has no spec line");
        }
    }

    Ok(compiled)
}

fn check_names(
    plugin_name: &str,
    command: &str,
    parameters: &[Parameter],
) -> Result<(), PluginError> {
    let invalid = |name: &str, reason| PluginError::InvalidName {
        plugin: plugin_name.to_string(),
        command: command.to_string(),
        name: name.to_string(),
        reason,
    };

    if command == HELP_NAME {
        return Err(invalid(command, "`help` is reserved for generated help"));
    }
    for parameter in parameters {
        let name = parameter.name.as_str();
        if name.trim().is_empty() {
            return Err(invalid(name, "parameter names must not be blank"));
        }
        if name.starts_with('-') {
            return Err(invalid(name, "parameter names must not start with '-'"));
        }
        if name == HELP_NAME {
            return Err(invalid(name, "`--help` is reserved for generated help"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArgumentValues;
    use serde_json::Value;
    use serde_json::json;

    fn config(value: Value) -> CommandConfig {
        match value {
            Value::Object(map) => CommandConfig::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_compile_greet_round_trip() {
        let compiled = compile(
            "greet",
            &lines(&["greet:echo hello {{ name }}"]),
            &config(json!({"greet": {"arguments": {"name": {}}}})),
        )
        .unwrap();

        assert_eq!(compiled.len(), 1);
        let greet = &compiled[0];
        assert_eq!(greet.name(), "greet");
        assert_eq!(greet.parameter_names().collect::<Vec<_>>(), vec!["name"]);

        let values: ArgumentValues = [("name".to_string(), "world".to_string())].into();
        assert_eq!(greet.render(&values).unwrap(), "echo hello world");
    }

    #[test]
    fn test_missing_configuration_means_no_parameters() {
        let compiled = compile("sys", &lines(&["uptime:uptime"]), &CommandConfig::default()).unwrap();
        assert_eq!(compiled[0].parameters().len(), 0);
        assert_eq!(compiled[0].template(), "uptime");
    }

    #[test]
    fn test_preserves_spec_order() {
        let compiled = compile(
            "multi",
            &lines(&["b:echo b", "a:echo a", "c:echo c"]),
            &CommandConfig::default(),
        )
        .unwrap();
        let names: Vec<_> = compiled.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let compiled = compile(
            "demo",
            &lines(&["", "# disabled:rm -rf /", "   ", "ok:echo ok"]),
            &CommandConfig::default(),
        )
        .unwrap();
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].name(), "ok");
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let err = compile(
            "demo",
            &lines(&["ok:echo ok", "no colon here"]),
            &CommandConfig::default(),
        )
        .unwrap_err();
        match err {
            PluginError::MalformedSpec {
                plugin,
                line,
                content,
            } => {
                assert_eq!(plugin, "demo");
                assert_eq!(line, 2);
                assert_eq!(content, "no colon here");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = compile(
            "demo",
            &lines(&["x:echo 1", "x:echo 2"]),
            &CommandConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PluginError::DuplicateCommand { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_bad_template_is_rejected() {
        let err = compile(
            "demo",
            &lines(&["x:echo {% if %}"]),
            &CommandConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PluginError::Template { ref command, .. } if command == "x"));
    }

    #[test]
    fn test_about_comes_from_configuration() {
        let compiled = compile(
            "files",
            &lines(&["list_files:ls -la {{ directory }}"]),
            &config(json!({
                "list_files": {
                    "help": "List files",
                    "arguments": {"directory": {"help": "Where to look"}}
                }
            })),
        )
        .unwrap();
        assert_eq!(compiled[0].about(), Some("List files"));
        assert_eq!(
            compiled[0].parameters()[0].help.as_deref(),
            Some("Where to look")
        );
    }

    fn invalid_name(err: PluginError) -> (String, String) {
        match err {
            PluginError::InvalidName { command, name, .. } => (command, name),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_help_command_is_rejected() {
        let err = compile("tools", &lines(&["help:echo ran-help"]), &CommandConfig::default())
            .unwrap_err();
        assert_eq!(invalid_name(err), ("help".to_string(), "help".to_string()));
    }

    #[test]
    fn test_help_parameter_is_rejected() {
        let err = compile(
            "tools",
            &lines(&["show:echo {{ help }}"]),
            &config(json!({"show": {"arguments": {"help": {}}}})),
        )
        .unwrap_err();
        assert_eq!(invalid_name(err), ("show".to_string(), "help".to_string()));
    }

    #[test]
    fn test_blank_parameter_names_are_rejected() {
        for bad in ["", "   ", "-x"] {
            let err = compile(
                "tools",
                &lines(&["show:echo hi"]),
                &config(json!({"show": {"arguments": {bad: {}}}})),
            )
            .unwrap_err();
            assert_eq!(invalid_name(err), ("show".to_string(), bad.to_string()));
        }
    }

    #[test]
    fn test_help_inside_longer_names_is_fine() {
        let compiled = compile(
            "tools",
            &lines(&["help_me:echo {{ help_text }}"]),
            &config(json!({"help_me": {"arguments": {"help_text": {}}}})),
        )
        .unwrap();
        assert_eq!(compiled[0].name(), "help_me");
    }
}

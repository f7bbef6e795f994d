//! Loads plugin configuration files (`commands.json`, `commands.yaml`, `commands.yml`).

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::domain::CommandConfig;
use crate::domain::PluginError;

/// Configuration file names probed in a plugin directory, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["commands.json", "commands.yaml", "commands.yml"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("yaml" | "yml") => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Returns the first configuration file present in `plugin_dir`.
pub fn find_config_file(plugin_dir: &Path) -> Result<Option<PathBuf>, PluginError> {
    for name in CONFIG_FILE_NAMES {
        let path = plugin_dir.join(name);
        if is_regular_file(&path)? {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// `Ok(false)` only when `path` is absent or not a file; other failures propagate.
pub fn is_regular_file(path: &Path) -> Result<bool, PluginError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PluginError::io(path, e)),
    }
}

/// Parses `path` as JSON or YAML depending on its extension.
pub fn load_configuration(path: &Path) -> Result<CommandConfig, PluginError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| PluginError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|e| PluginError::io(path, e))?;

    let value = match format {
        ConfigFormat::Json => {
            serde_json::from_str::<Value>(&content).map_err(|source| PluginError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        ConfigFormat::Yaml if content.trim().is_empty() => Value::Null,
        ConfigFormat::Yaml => {
            serde_yml::from_str::<Value>(&content).map_err(|source| PluginError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    let entries = match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(PluginError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("top level must be a mapping, found {}", kind_of(&other)),
            });
        }
    };

    debug!(path = %path.display(), ?format, commands = entries.len(), "Configuration loaded");
    Ok(CommandConfig::new(entries))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

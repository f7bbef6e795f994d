//! Plugin registry: scans a plugins directory and holds compiled namespaces.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;
use tracing::trace;
use tracing::warn;

use crate::domain::CompiledCommand;
use crate::domain::PluginError;
use crate::domain::PluginNamespace;
use crate::infra::COMMANDS_FILE_NAME;
use crate::infra::find_config_file;
use crate::infra::is_regular_file;
use crate::infra::load_commands;
use crate::infra::load_configuration;
use crate::usecases::compile::compile;

/// Namespace name to compiled plugin, ordered by name.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    namespaces: BTreeMap<String, PluginNamespace>,
    reserved: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespaces that must never be registered, e.g. built-in command names.
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: BTreeMap::new(),
            reserved: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|reserved| reserved == name)
    }

    /// Adds `namespace`, replacing any namespace of the same name.
    ///
    /// Returns `false` without registering when the name is reserved.
    pub fn register(&mut self, namespace: PluginNamespace) -> bool {
        if self.is_reserved(&namespace.name) {
            warn!(
                plugin = %namespace.name,
                "Plugin name collides with a built-in command; skipping"
            );
            return false;
        }
        self.namespaces.insert(namespace.name.clone(), namespace);
        true
    }

    pub fn get(&self, name: &str) -> Option<&PluginNamespace> {
        self.namespaces.get(name)
    }

    pub fn lookup(&self, plugin: &str, command: &str) -> Option<&CompiledCommand> {
        self.get(plugin).and_then(|namespace| namespace.command(command))
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &PluginNamespace> {
        self.namespaces.values()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.namespaces.values().map(|ns| ns.commands.len()).sum()
    }

    /// Loads every plugin under `directory` into this registry.
    ///
    /// Subdirectories without `commands.txt` or a `commands.{json,yaml,yml}`
    /// file are skipped. Read, parse and compile errors propagate, including
    /// a plugin folder that cannot be inspected.
    pub fn load_dir(&mut self, directory: &Path) -> Result<(), PluginError> {
        if !directory.is_dir() {
            return Err(PluginError::PluginsDirNotFound {
                path: directory.to_path_buf(),
            });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(directory).map_err(|e| PluginError::io(directory, e))? {
            let entry = entry.map_err(|e| PluginError::io(directory, e))?;
            let path = entry.path();
            let metadata = fs::metadata(&path).map_err(|e| PluginError::io(&path, e))?;
            if metadata.is_dir() {
                entries.push(entry);
            }
        }
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let plugin_dir = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(dir = %plugin_dir.display(), "Plugin directory name is not UTF-8; skipping");
                continue;
            };
            if self.is_reserved(&name) {
                warn!(plugin = %name, "Plugin name collides with a built-in command; skipping");
                continue;
            }
            if let Some(namespace) = load_plugin(&name, &plugin_dir)? {
                self.register(namespace);
            }
        }

        info!(
            dir = %directory.display(),
            plugins = self.len(),
            commands = self.command_count(),
            "Plugins loaded"
        );
        Ok(())
    }
}

/// Scans `directory` and returns a registry of every complete plugin in it.
pub fn load_plugins(directory: &Path) -> Result<PluginRegistry, PluginError> {
    let mut registry = PluginRegistry::new();
    registry.load_dir(directory)?;
    Ok(registry)
}

/// Loads one plugin directory, or `None` when its files are incomplete.
pub fn load_plugin(name: &str, plugin_dir: &Path) -> Result<Option<PluginNamespace>, PluginError> {
    let commands_file = plugin_dir.join(COMMANDS_FILE_NAME);
    let has_commands = is_regular_file(&commands_file)?;
    let config_file = find_config_file(plugin_dir)?;
    let (true, Some(config_file)) = (has_commands, config_file) else {
        trace!(plugin = name, dir = %plugin_dir.display(), "Not a plugin directory");
        return Ok(None);
    };

    let commands = load_commands(&commands_file)?;
    let configuration = load_configuration(&config_file)?;
    let compiled = compile(name, &commands, &configuration)?;

    info!(
        plugin = name,
        config = %config_file.display(),
        commands = compiled.len(),
        "Plugin registered"
    );
    Ok(Some(PluginNamespace {
        name: name.to_string(),
        dir: plugin_dir.to_path_buf(),
        commands: compiled,
    }))
}

//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::infra::shell::SystemShell;

pub const SHELL_ENV: &str = "SPELL_CRAFT_SHELL";
pub const PLUGINS_DIR_ENV: &str = "SPELL_CRAFT_PLUGINS_DIR";
pub const PROPAGATE_EXIT_ENV: &str = "SPELL_CRAFT_PROPAGATE_EXIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellCraftConfig {
    shell: Option<String>,
    plugins_dir: Option<PathBuf>,
    propagate_exit: bool,
}

impl Default for SpellCraftConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SpellCraftConfig {
    pub fn from_env() -> Self {
        Self {
            shell: non_empty_env(SHELL_ENV),
            plugins_dir: non_empty_env(PLUGINS_DIR_ENV).map(PathBuf::from),
            propagate_exit: parse_env_bool(PROPAGATE_EXIT_ENV, false),
        }
    }

    pub fn shell(&self) -> SystemShell {
        match &self.shell {
            Some(program) => SystemShell::new(program.clone()),
            None => SystemShell::default(),
        }
    }

    pub fn plugins_dir(&self) -> Option<&PathBuf> {
        self.plugins_dir.as_ref()
    }

    /// Whether a failing incantation's exit code becomes the CLI's exit code.
    pub fn propagate_exit(&self) -> bool {
        self.propagate_exit
    }

    pub fn with_shell(mut self, program: impl Into<String>) -> Self {
        self.shell = Some(program.into());
        self
    }

    pub fn with_plugins_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugins_dir = Some(dir.into());
        self
    }

    pub fn with_propagate_exit(mut self, propagate: bool) -> Self {
        self.propagate_exit = propagate;
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env_bool(key: &str, default: bool) -> bool {
    let Some(value) = non_empty_env(key) else {
        return default;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(value = %value, key, "Invalid boolean config; using default");
            default
        }
    }
}

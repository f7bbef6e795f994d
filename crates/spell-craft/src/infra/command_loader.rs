//! Loads `commands.txt` into raw command spec lines.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::PluginError;

pub const COMMANDS_FILE_NAME: &str = "commands.txt";

/// Returns every line of `path` in order, blank lines included.
pub fn load_commands(path: &Path) -> Result<Vec<String>, PluginError> {
    let content = fs::read_to_string(path).map_err(|e| PluginError::io(path, e))?;
    let commands: Vec<String> = content.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = commands.len(), "Command list loaded");
    Ok(commands)
}

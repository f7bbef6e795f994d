#![expect(dead_code, reason = "Test harness helpers are used selectively.")]

//! Test harness exports.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const ISOLATED_ENV: [&str; 6] = [
    "SPELL_CRAFT_PLUGINS_DIR",
    "SPELL_CRAFT_PROPAGATE_EXIT",
    "SPELL_CRAFT_SHELL",
    "SPELL_CRAFT_LOG",
    "SPELL_CRAFT_LOG_FORMAT",
    "RUST_LOG",
];

/// The binary with a clean spell-craft environment and colors off.
pub fn spell_craft_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("spell-craft"));
    for key in ISOLATED_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Plugins shipped under `demos/plugins` at the workspace root.
pub fn demo_plugins_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join("plugins")
}

/// A temporary plugins directory populated one plugin at a time.
pub struct PluginsDir {
    root: TempDir,
}

impl PluginsDir {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn path_str(&self) -> &str {
        self.root.path().to_str().expect("temp dir path is UTF-8")
    }

    /// Writes `files` into `<root>/<name>/`.
    pub fn plugin(&self, name: &str, files: &[(&str, &str)]) -> &Self {
        let dir = self.root.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create plugin dir");
        for (file, content) in files {
            fs::write(dir.join(file), content).expect("Failed to write plugin file");
        }
        self
    }

    /// The `echo_str` plugin: `echo_str --message <MESSAGE>`.
    pub fn with_echo_plugin(&self) -> &Self {
        self.plugin(
            "echo_str",
            &[
                ("commands.txt", "echo_str:echo {{ message }}\n"),
                (
                    "commands.yaml",
                    "echo_str:\n  help: Echo a message\n  arguments:\n    message:\n      help: Text to print\n",
                ),
            ],
        )
    }

    /// The `list_files` plugin: `list_files --directory <DIRECTORY>`.
    pub fn with_list_files_plugin(&self) -> &Self {
        self.plugin(
            "list_files",
            &[
                ("commands.txt", "list_files:ls -la {{ directory }}\n"),
                (
                    "commands.json",
                    r#"{"list_files": {"arguments": {"directory": {}}}}"#,
                ),
            ],
        )
    }

    /// A plugin whose command fails with exit code 3 and a message on stderr.
    pub fn with_failing_plugin(&self) -> &Self {
        self.plugin(
            "fail",
            &[
                ("commands.txt", "boom:echo {{ reason }} >&2; exit 3\n"),
                ("commands.json", r#"{"boom": {"arguments": {"reason": {}}}}"#),
            ],
        )
    }
}

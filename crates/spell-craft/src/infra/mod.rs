//! Filesystem, environment and process adapters.

pub mod command_loader;
pub mod config;
pub mod config_loader;
pub mod shell;

pub use command_loader::COMMANDS_FILE_NAME;
pub use command_loader::load_commands;
pub use config::SpellCraftConfig;
pub use config_loader::CONFIG_FILE_NAMES;
pub use config_loader::ConfigFormat;
pub use config_loader::find_config_file;
pub use config_loader::is_regular_file;
pub use config_loader::load_configuration;
pub use shell::SystemShell;

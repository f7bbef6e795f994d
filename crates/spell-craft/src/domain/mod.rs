//! Plugin domain types.

mod compiled;
mod config;
mod error;
mod spec;

pub use compiled::ArgumentValues;
pub use compiled::CompiledCommand;
pub use compiled::PluginNamespace;
pub use config::CommandConfig;
pub use config::Parameter;
pub use error::ErrorCategory;
pub use error::PluginError;
pub use error::RenderError;
pub use spec::CommandSpec;

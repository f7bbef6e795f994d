//! Plugin use cases: compile, register, invoke.

pub mod compile;
pub mod invoke;
pub mod ports;
pub mod registry;

pub use compile::compile;
pub use invoke::InvocationOutcome;
pub use invoke::InvokeError;
pub use invoke::invoke;
pub use ports::ShellError;
pub use ports::ShellOutput;
pub use ports::ShellRunner;
pub use registry::PluginRegistry;
pub use registry::load_plugin;
pub use registry::load_plugins;

#![expect(clippy::print_stdout, reason = "CLI output is emitted here")]
#![expect(clippy::print_stderr, reason = "CLI output is emitted here")]

//! CLI output presenter.

use std::path::Path;

use serde::Serialize;
use serde_json::json;
use spell_craft_common::Colors;
use spell_craft_common::Hue;

use crate::app::commands::OutputFormat;
use crate::domain::PluginNamespace;
use crate::usecases::InvocationOutcome;
use crate::usecases::PluginRegistry;

const PROGRAM_NAME: &str = "spell-craft";

#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            name: PROGRAM_NAME,
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("SPELL_CRAFT_GIT_SHA"),
        }
    }
}

pub trait Presenter {
    fn present_greeting(&self, greeting: &str, hue: Hue);

    /// `detailed` adds build metadata to the one-line version.
    fn present_version(&self, info: &VersionInfo, detailed: bool);

    fn present_outcome(&self, outcome: &InvocationOutcome);

    fn present_catalog(&self, dir: &Path, registry: &PluginRegistry);

    fn present_error(&self, message: &str, suggestion: Option<&str>);
}

pub fn create_presenter(format: OutputFormat) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Text => Box::new(TextPresenter),
        OutputFormat::Json => Box::new(JsonPresenter),
    }
}

pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn present_greeting(&self, greeting: &str, hue: Hue) {
        println!("{}", Colors::bold_hue(greeting, hue));
    }

    fn present_version(&self, info: &VersionInfo, detailed: bool) {
        println!("{} version: {}", info.name, Colors::version(info.version));
        if detailed {
            println!("  commit: {}", Colors::dim(info.commit));
        }
    }

    fn present_outcome(&self, outcome: &InvocationOutcome) {
        let text = with_trailing_newline(&outcome.output);
        if outcome.success {
            print!("{}", text);
        } else {
            eprint!("{}", text);
        }
    }

    fn present_catalog(&self, dir: &Path, registry: &PluginRegistry) {
        if registry.is_empty() {
            println!("No plugins found in {}", dir.display());
            return;
        }
        println!(
            "{} {} plugin(s), {} command(s) in {}",
            Colors::bold("Plugins:"),
            registry.len(),
            registry.command_count(),
            dir.display()
        );
        for namespace in registry.namespaces() {
            print_namespace(namespace);
        }
    }

    fn present_error(&self, message: &str, suggestion: Option<&str>) {
        eprintln!("{}: {} {}", PROGRAM_NAME, Colors::error("Error:"), message);
        if let Some(suggestion) = suggestion {
            eprintln!("{} {}", Colors::warning("Suggestion:"), suggestion);
        }
    }
}

fn print_namespace(namespace: &PluginNamespace) {
    println!();
    println!("{}", Colors::name(&namespace.name));
    for command in &namespace.commands {
        let flags: Vec<String> = command
            .parameters()
            .iter()
            .map(|parameter| format!("--{} <{}>", parameter.name, parameter.name.to_uppercase()))
            .collect();
        let mut line = format!("  {}", Colors::bold(command.name()));
        if !flags.is_empty() {
            line.push(' ');
            line.push_str(&flags.join(" "));
        }
        if let Some(about) = command.about() {
            line.push_str(&format!("  {}", Colors::dim(about)));
        }
        println!("{}", line);
    }
}

/// Child output as printed: untouched when empty or already newline-terminated.
fn with_trailing_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

pub struct JsonPresenter;

impl JsonPresenter {
    fn print(value: &impl Serialize) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

impl Presenter for JsonPresenter {
    fn present_greeting(&self, greeting: &str, hue: Hue) {
        Self::print(&json!({ "greeting": greeting, "color": hue.as_str() }));
    }

    fn present_version(&self, info: &VersionInfo, _detailed: bool) {
        Self::print(info);
    }

    fn present_outcome(&self, outcome: &InvocationOutcome) {
        Self::print(outcome);
    }

    fn present_catalog(&self, dir: &Path, registry: &PluginRegistry) {
        let plugins: Vec<&PluginNamespace> = registry.namespaces().collect();
        Self::print(&json!({
            "plugins_dir": dir.display().to_string(),
            "plugins": plugins,
        }));
    }

    fn present_error(&self, message: &str, suggestion: Option<&str>) {
        let mut output = json!({ "success": false, "error": message });
        if let Some(suggestion) = suggestion {
            output["suggestion"] = json!(suggestion);
        }
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    }
}

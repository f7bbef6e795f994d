//! Command handlers wired from the application layer.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use rand::seq::IndexedRandom;
use spell_craft_common::Hue;
use tracing::debug;

use crate::app::commands::BUILTIN_COMMANDS;
use crate::app::commands::GreetColor;
use crate::app::commands::OutputFormat;
use crate::app::dynamic;
use crate::app::error::CliError;
use crate::app::error::ErrorView;
use crate::app::presenter::Presenter;
use crate::app::presenter::VersionInfo;
use crate::app::presenter::create_presenter;
use crate::infra::SpellCraftConfig;
use crate::infra::config::PLUGINS_DIR_ENV;
use crate::usecases::PluginRegistry;
use crate::usecases::invoke;

const PROGRAM_NAME: &str = "spell-craft";

/// Exit code reported when a child ends without one (killed by a signal).
const SIGNALED_EXIT_CODE: i32 = 1;

pub type HandlerResult = Result<()>;

pub struct HandlerContext {
    pub format: OutputFormat,
    pub config: SpellCraftConfig,
    presenter: Box<dyn Presenter>,
}

impl HandlerContext {
    pub fn new(format: OutputFormat, config: SpellCraftConfig) -> Self {
        Self {
            format,
            config,
            presenter: create_presenter(format),
        }
    }

    pub fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }
}

pub fn greeting(name: &str) -> String {
    format!("Hello {}!", name)
}

fn random_hue() -> Hue {
    Hue::ALL
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(Hue::White)
}

pub fn handle_greet(ctx: &HandlerContext, name: &str, color: Option<GreetColor>) -> HandlerResult {
    let hue = color.map(Hue::from).unwrap_or_else(random_hue);
    debug!(name, color = hue.as_str(), "Greeting");
    ctx.presenter().present_greeting(&greeting(name), hue);
    Ok(())
}

pub fn handle_version(ctx: &HandlerContext, detailed: bool) -> HandlerResult {
    ctx.presenter()
        .present_version(&VersionInfo::current(), detailed);
    Ok(())
}

/// Loads `dir` into a registry that refuses built-in command names.
pub fn load_registry(dir: &Path) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::with_reserved(BUILTIN_COMMANDS);
    registry
        .load_dir(dir)
        .with_context(|| format!("failed to load plugins from {}", dir.display()))?;
    Ok(registry)
}

fn configured_plugins_dir(ctx: &HandlerContext) -> Result<PathBuf> {
    ctx.config.plugins_dir().cloned().ok_or_else(|| {
        anyhow!(
            "No plugins directory configured. Pass --plugins-dir <DIR> or set {}.",
            PLUGINS_DIR_ENV
        )
    })
}

pub fn handle_list(ctx: &HandlerContext, dir: Option<&Path>) -> HandlerResult {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => configured_plugins_dir(ctx)?,
    };
    let registry = load_registry(&dir)?;
    ctx.presenter().present_catalog(&dir, &registry);
    Ok(())
}

/// `generate-cli <DIR> [ARGS]...`: prints the generated help, or runs ARGS.
pub fn handle_generate_cli(ctx: &HandlerContext, dir: &Path, args: &[String]) -> Result<i32> {
    let registry = load_registry(dir)?;
    let bin_name = format!("{} generate-cli {}", PROGRAM_NAME, dir.display());

    if args.is_empty() {
        match ctx.format {
            OutputFormat::Json => ctx.presenter().present_catalog(dir, &registry),
            OutputFormat::Text => dynamic::build_cli(&registry, &bin_name)
                .print_long_help()
                .context("failed to print generated help")?,
        }
        return Ok(0);
    }

    run_incantation(ctx, &registry, &bin_name, args)
}

/// `spell-craft <plugin> <command> ...` against the configured plugins directory.
pub fn handle_external(ctx: &HandlerContext, args: &[String]) -> Result<i32> {
    let Some(dir) = ctx.config.plugins_dir() else {
        bail!(
            "Unrecognized subcommand '{}'. Plugin commands need --plugins-dir <DIR> or {}.",
            args.first().map(String::as_str).unwrap_or_default(),
            PLUGINS_DIR_ENV
        );
    };
    let registry = load_registry(dir)?;
    run_incantation(ctx, &registry, PROGRAM_NAME, args)
}

fn run_incantation(
    ctx: &HandlerContext,
    registry: &PluginRegistry,
    bin_name: &str,
    args: &[String],
) -> Result<i32> {
    let invocation = match dynamic::parse_invocation(registry, bin_name, args) {
        Ok(invocation) => invocation,
        Err(usage) if ctx.format == OutputFormat::Json && usage.use_stderr() => {
            let view = ErrorView::usage(&usage);
            return Err(anyhow::Error::new(CliError::new(
                ctx.format,
                view.message.clone(),
                Some(view.to_json_string()),
                usage.exit_code(),
            )));
        }
        Err(usage) => {
            usage.print().context("failed to print usage")?;
            return Ok(usage.exit_code());
        }
    };

    let shell = ctx.config.shell();
    debug!(
        plugin = %invocation.plugin.name,
        command = invocation.command.name(),
        shell = shell.program(),
        "Invoking plugin command"
    );
    let outcome = invoke(
        &shell,
        &invocation.plugin.name,
        invocation.command,
        &invocation.values,
    )?;
    ctx.presenter().present_outcome(&outcome);

    if outcome.success || !ctx.config.propagate_exit() {
        return Ok(0);
    }
    Ok(outcome.exit_code.unwrap_or(SIGNALED_EXIT_CODE))
}

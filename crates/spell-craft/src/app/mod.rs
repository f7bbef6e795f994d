#![expect(clippy::print_stderr, reason = "CLI output is emitted here")]

//! CLI application layer and composition root wiring.

use anyhow::Context;
use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use spell_craft_common::color_init;
use spell_craft_common::telemetry;
use tracing::debug;

pub mod commands;
pub mod dynamic;
pub mod error;
pub mod handlers;
pub mod presenter;

use crate::app::commands::Cli;
use crate::app::commands::Commands;
use crate::app::commands::OutputFormat;
use crate::app::error::CliError;
use crate::app::error::ErrorView;
use crate::app::error::find_error;
use crate::app::handlers::HandlerContext;
use crate::app::presenter::Presenter;
use crate::app::presenter::TextPresenter;
use crate::app::presenter::create_presenter;
use crate::domain::ErrorCategory;
use crate::infra::SpellCraftConfig;

/// Exit codes following sysexits.h conventions.
///
/// Clap usage errors keep clap's own code (2). A failing plugin command
/// exits 0 unless `--propagate-exit` is set.
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const USAGE: i32 = 64;
    pub const DATAERR: i32 = 65;
    pub const NOINPUT: i32 = 66;
    pub const IOERR: i32 = 74;
}

pub struct Application;

impl Application {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<i32> {
        let exit_code = match self.execute() {
            Ok(code) => code,
            Err(e) => self.handle_error(e),
        };
        Ok(exit_code)
    }

    fn execute(&self) -> Result<i32> {
        let cli = Cli::parse();
        let _telemetry = telemetry::init_tracing(if cli.verbose { "debug" } else { "warn" });
        color_init(cli.no_color);
        let format = cli.effective_format();
        debug!(
            command = ?cli.command,
            plugins_dir = ?cli.plugins_dir,
            format = ?format,
            "CLI command parsed"
        );

        let mut config = SpellCraftConfig::from_env();
        if let Some(dir) = &cli.plugins_dir {
            config = config.with_plugins_dir(dir.clone());
        }
        if cli.propagate_exit {
            config = config.with_propagate_exit(true);
        }
        let ctx = HandlerContext::new(format, config);

        self.dispatch_command(&ctx, &cli)
            .map_err(|e| self.wrap_error(e, format))
    }

    fn dispatch_command(&self, ctx: &HandlerContext, cli: &Cli) -> Result<i32> {
        if cli.version {
            handlers::handle_version(ctx, false)?;
            return Ok(exit_codes::SUCCESS);
        }

        let Some(command) = &cli.command else {
            Cli::command()
                .print_help()
                .context("failed to print help")?;
            return Ok(exit_codes::SUCCESS);
        };

        match command {
            Commands::Greet { name, color } => handlers::handle_greet(ctx, name, *color)?,
            Commands::Version => handlers::handle_version(ctx, true)?,
            Commands::List { dir } => handlers::handle_list(ctx, dir.as_deref())?,
            Commands::GenerateCli { dir, args } => {
                return handlers::handle_generate_cli(ctx, dir, args);
            }
            Commands::External(args) => return handlers::handle_external(ctx, args),
        }
        Ok(exit_codes::SUCCESS)
    }

    fn handle_error(&self, e: anyhow::Error) -> i32 {
        if let Some(cli_error) = find_error::<CliError>(&e) {
            print_cli_error(cli_error);
            return cli_error.exit_code;
        }

        if let Some(view) = ErrorView::from_chain(&e) {
            TextPresenter.present_error(&view.message, Some(&view.suggestion));
            exit_code_for_category(view.category)
        } else {
            TextPresenter.present_error(&e.to_string(), None);
            exit_codes::GENERAL_ERROR
        }
    }
}

impl Application {
    fn wrap_error(&self, error: anyhow::Error, format: OutputFormat) -> anyhow::Error {
        if find_error::<CliError>(&error).is_some() {
            return error;
        }
        if format != OutputFormat::Json {
            return error;
        }

        if let Some(view) = ErrorView::from_chain(&error) {
            return anyhow::Error::new(CliError::new(
                format,
                view.message.clone(),
                Some(view.to_json_string()),
                exit_code_for_category(view.category),
            ));
        }

        anyhow::Error::new(CliError::new(
            format,
            error.to_string(),
            None,
            exit_codes::GENERAL_ERROR,
        ))
    }
}

fn print_cli_error(error: &CliError) {
    match (&error.json, error.format) {
        (Some(json), OutputFormat::Json) => eprintln!("{}", json),
        (_, format) => create_presenter(format).present_error(&error.message, None),
    }
}

fn exit_code_for_category(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::InvalidInput => exit_codes::USAGE,
        ErrorCategory::InvalidData => exit_codes::DATAERR,
        ErrorCategory::NotFound => exit_codes::NOINPUT,
        ErrorCategory::External => exit_codes::IOERR,
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

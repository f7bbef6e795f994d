//! Command tree generated from a plugin registry.
//!
//! Shape: `<bin> <plugin> <command> --<param> <value>...`. Every parameter is
//! a required string flag; names containing `_` also accept a kebab-case alias.

use std::iter;

use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap::error::ErrorKind;

use crate::domain::ArgumentValues;
use crate::domain::CompiledCommand;
use crate::domain::Parameter;
use crate::domain::PluginNamespace;
use crate::usecases::PluginRegistry;

/// A parsed request to run one command of one plugin.
#[derive(Debug)]
pub struct Invocation<'r> {
    pub plugin: &'r PluginNamespace,
    pub command: &'r CompiledCommand,
    pub values: ArgumentValues,
}

pub fn build_cli(registry: &PluginRegistry, bin_name: &str) -> Command {
    let root = Command::new(bin_name.to_string())
        .bin_name(bin_name.to_string())
        .about("Commands generated from plugin folders")
        .subcommand_required(true)
        .arg_required_else_help(true);

    registry
        .namespaces()
        .fold(root, |root, namespace| root.subcommand(namespace_command(namespace)))
}

fn namespace_command(namespace: &PluginNamespace) -> Command {
    let group = Command::new(namespace.name.clone())
        .about(format!("Commands from {}", namespace.dir.display()))
        .subcommand_required(true)
        .arg_required_else_help(true);

    namespace.commands.iter().fold(group, |group, command| {
        group.subcommand(incantation_command(command))
    })
}

fn incantation_command(command: &CompiledCommand) -> Command {
    let mut cmd = Command::new(command.name().to_string());
    cmd = match command.about() {
        Some(about) => cmd.about(about.to_string()),
        None => cmd.about(format!("Runs: {}", command.template())),
    };

    let names: Vec<&str> = command.parameter_names().collect();
    for parameter in command.parameters() {
        cmd = cmd.arg(parameter_arg(parameter, &names));
    }
    cmd
}

fn parameter_arg(parameter: &Parameter, all_names: &[&str]) -> Arg {
    let mut arg = Arg::new(parameter.name.clone())
        .long(parameter.name.clone())
        .value_name(parameter.name.to_uppercase())
        .value_parser(clap::value_parser!(String))
        .action(ArgAction::Set)
        .required(true);

    if let Some(help) = &parameter.help {
        arg = arg.help(help.clone());
    }

    let kebab = parameter.name.replace('_', "-");
    if kebab != parameter.name && !all_names.contains(&kebab.as_str()) {
        arg = arg.visible_alias(kebab);
    }
    arg
}

/// Parses `args` (without the binary name) against the generated tree.
///
/// Help, version and usage problems come back as `clap::Error`, ready to be
/// printed with `Error::print`.
pub fn parse_invocation<'r>(
    registry: &'r PluginRegistry,
    bin_name: &str,
    args: &[String],
) -> Result<Invocation<'r>, clap::Error> {
    let mut cli = build_cli(registry, bin_name);
    let matches = cli.try_get_matches_from_mut(
        iter::once(bin_name.to_string()).chain(args.iter().cloned()),
    )?;

    let Some((plugin_name, plugin_matches)) = matches.subcommand() else {
        return Err(cli.error(ErrorKind::MissingSubcommand, "a plugin name is required"));
    };
    let Some(plugin) = registry.get(plugin_name) else {
        return Err(cli.error(
            ErrorKind::InvalidSubcommand,
            format!("unknown plugin '{}'", plugin_name),
        ));
    };
    let Some((command_name, command_matches)) = plugin_matches.subcommand() else {
        return Err(cli.error(ErrorKind::MissingSubcommand, "a command name is required"));
    };
    let Some(command) = plugin.command(command_name) else {
        return Err(cli.error(
            ErrorKind::InvalidSubcommand,
            format!("unknown command '{}' in plugin '{}'", command_name, plugin_name),
        ));
    };

    Ok(Invocation {
        plugin,
        command,
        values: argument_values(command, command_matches),
    })
}

fn argument_values(command: &CompiledCommand, matches: &ArgMatches) -> ArgumentValues {
    command
        .parameters()
        .iter()
        .filter_map(|parameter| {
            matches
                .get_one::<String>(&parameter.name)
                .map(|value| (parameter.name.clone(), value.clone()))
        })
        .collect()
}

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap::ValueHint;
use spell_craft_common::Hue;
use std::path::PathBuf;

const AFTER_HELP: &str =
    "Use --help for full details and examples. Use --format json for machine-readable output.";

const LONG_ABOUT: &str = "\
Build command-line interfaces from declarative plugin folders.\n\
\n\
Each plugin directory holds a commands.txt file of `name:template` lines and a\n\
commands.json / commands.yaml file describing each command's arguments.\n\
Every command becomes `<plugin> <command> --<argument> <value>...`.";

const AFTER_LONG_HELP: &str = r#"PLUGIN LAYOUT:
    plugins/
      list_files/
        commands.txt     list_files:ls -la {{ directory }}
        commands.json    {"list_files": {"arguments": {"directory": {}}}}

OUTPUT:
    Successful commands print their stdout; failing commands print their stderr.
    --propagate-exit   Exit with the command's own exit code
    --format json      Machine-readable JSON

EXAMPLES:
    # Greet someone in a random color
    spell-craft greet --name Ada

    # Show the CLI generated from a plugins directory
    spell-craft generate-cli ./plugins

    # Run a plugin command
    spell-craft generate-cli ./plugins list_files list_files --directory /tmp

    # Same, dispatching plugins at the top level
    SPELL_CRAFT_PLUGINS_DIR=./plugins spell-craft list_files list_files --directory /tmp"#;

#[derive(Debug, Parser)]
#[command(name = "spell-craft")]
#[command(author, disable_version_flag = true)]
#[command(about = "Build command-line interfaces from declarative plugin folders")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = AFTER_HELP)]
#[command(after_long_help = AFTER_LONG_HELP)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the version and exit
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Plugins directory for top-level plugin commands
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help_heading = "Plugin Options"
    )]
    pub plugins_dir: Option<PathBuf>,

    /// Exit with the plugin command's exit code instead of 0
    #[arg(long, global = true, help_heading = "Plugin Options")]
    pub propagate_exit: bool,

    /// Output format (text or json)
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value_t = OutputFormat::Text,
        help_heading = "Output Options"
    )]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true, help_heading = "Output Options")]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR", help_heading = "Output Options")]
    pub no_color: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Debug Options")]
    pub verbose: bool,
}

impl Cli {
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a colorful greeting
    #[command(long_about = "\
Print `Hello <NAME>!` in bold color.

A random color is picked when --color is omitted.")]
    Greet {
        /// Who to greet
        #[arg(long)]
        name: String,

        /// Greeting color
        #[arg(
            short = 'c',
            long = "color",
            visible_alias = "colour",
            value_enum,
            ignore_case = true
        )]
        color: Option<GreetColor>,
    },

    /// Show version and build information
    Version,

    /// Build the CLI from a plugins directory and run ARGS against it
    #[command(long_about = "\
Load every plugin under PLUGINS_DIR and build a command tree from them.

Without ARGS the generated help is printed. With ARGS, the first is the plugin
name, the second the command name, followed by --<argument> <value> pairs.")]
    GenerateCli {
        /// Directory containing one subdirectory per plugin
        #[arg(value_name = "PLUGINS_DIR", value_hint = ValueHint::DirPath)]
        dir: PathBuf,

        /// Plugin invocation: <PLUGIN> <COMMAND> [--<ARGUMENT> <VALUE>]...
        #[arg(
            value_name = "ARGS",
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// List plugins, their commands and arguments
    List {
        /// Directory containing one subdirectory per plugin (defaults to --plugins-dir)
        #[arg(value_name = "PLUGINS_DIR", value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Run a plugin command (requires --plugins-dir or SPELL_CRAFT_PLUGINS_DIR)
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Names reserved by built-in subcommands; plugins may not shadow them.
pub const BUILTIN_COMMANDS: [&str; 5] = ["greet", "version", "generate-cli", "list", "help"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GreetColor {
    White,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Green,
}

impl From<GreetColor> for Hue {
    fn from(color: GreetColor) -> Self {
        match color {
            GreetColor::White => Hue::White,
            GreetColor::Red => Hue::Red,
            GreetColor::Cyan => Hue::Cyan,
            GreetColor::Magenta => Hue::Magenta,
            GreetColor::Yellow => Hue::Yellow,
            GreetColor::Green => Hue::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_greet_accepts_colour_alias_case_insensitively() {
        let cli = Cli::try_parse_from(["spell-craft", "greet", "--name", "Ada", "--colour", "RED"])
            .unwrap();
        match cli.command {
            Some(Commands::Greet { name, color }) => {
                assert_eq!(name, "Ada");
                assert_eq!(color, Some(GreetColor::Red));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_greet_short_color_flag() {
        let cli =
            Cli::try_parse_from(["spell-craft", "greet", "--name", "Ada", "-c", "cyan"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Greet {
                color: Some(GreetColor::Cyan),
                ..
            })
        ));
    }

    #[test]
    fn test_greet_rejects_unknown_color() {
        let result = Cli::try_parse_from(["spell-craft", "greet", "--name", "Ada", "-c", "blue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_cli_collects_trailing_args() {
        let cli = Cli::try_parse_from([
            "spell-craft",
            "generate-cli",
            "plugins",
            "list_files",
            "list_files",
            "--directory",
            "/tmp",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::GenerateCli { dir, args }) => {
                assert_eq!(dir, PathBuf::from("plugins"));
                assert_eq!(args, vec!["list_files", "list_files", "--directory", "/tmp"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subcommand_is_external() {
        let cli = Cli::try_parse_from(["spell-craft", "echo_str", "echo_str", "--message", "hi"])
            .unwrap();
        match cli.command {
            Some(Commands::External(args)) => {
                assert_eq!(args, vec!["echo_str", "echo_str", "--message", "hi"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_json_flag_overrides_format() {
        let cli = Cli::try_parse_from(["spell-craft", "--json", "version"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Json);
    }

    #[test]
    fn test_version_flag_without_subcommand() {
        let cli = Cli::try_parse_from(["spell-craft", "-V"]).unwrap();
        assert!(cli.version);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_every_greet_color_maps_to_a_hue() {
        for color in GreetColor::value_variants() {
            let hue: Hue = (*color).into();
            assert_eq!(
                hue.as_str(),
                color.to_possible_value().unwrap().get_name()
            );
        }
    }
}

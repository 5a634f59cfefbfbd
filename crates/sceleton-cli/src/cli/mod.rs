//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  Checks clap cannot express live in
//! [`validate`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub mod validate;

pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sceleton",
    bin_name = "sceleton",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Python package scaffolding",
    long_about = "Sceleton creates setup.py based Python package layouts, edits \
                  their metadata and wraps pip, twine, venv and git.",
    after_help = "EXAMPLES:\n\
        \x20 sceleton new my-package --quick\n\
        \x20 sceleton new my-site --django --venv\n\
        \x20 sceleton add requests click\n\
        \x20 sceleton license --edit\n\
        \x20 sceleton completions bash > /usr/share/bash-completion/completions/sceleton",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new package directory.
    #[command(
        visible_alias = "n",
        about = "Create a new package",
        after_help = "EXAMPLES:\n\
            \x20 sceleton new my-package\n\
            \x20 sceleton new my-package --quick --venv\n\
            \x20 sceleton new my-site --django"
    )]
    New(NewArgs),

    /// Write setup.py and friends into an existing directory.
    #[command(
        about = "Add setup.py to an existing directory",
        after_help = "EXAMPLES:\n\
            \x20 sceleton init\n\
            \x20 sceleton init --path ../legacy-code --quick"
    )]
    Init(InitArgs),

    /// Add requirements to install_requires.
    #[command(about = "Add packages to install_requires")]
    Add(PackagesArgs),

    /// Remove requirements from install_requires.
    #[command(visible_alias = "rm", about = "Remove packages from install_requires")]
    Remove(PackagesArgs),

    /// pip install and record in install_requires.
    #[command(
        visible_alias = "i",
        about = "pip install packages and add them to install_requires"
    )]
    Install(PackagesArgs),

    /// Show or edit the trove classifiers.
    #[command(about = "Show or edit classifiers")]
    Classifiers(FieldArgs),

    /// Show or edit the author name and e-mail.
    #[command(about = "Show or edit author and e-mail")]
    User(FieldArgs),

    /// Show or change the license.
    #[command(about = "Show or change the license")]
    License(FieldArgs),

    /// Show or edit the keywords.
    #[command(about = "Show or edit keywords")]
    Keywords(FieldArgs),

    /// Create a sub-package next to setup.py.
    #[command(
        about = "Create a module directory with __init__.py",
        after_help = "EXAMPLES:\n\
            \x20 sceleton module utils"
    )]
    Module(ModuleArgs),

    /// setup.py sdist bdist_wheel
    #[command(about = "Build source and wheel distributions")]
    Build,

    /// setup.py sdist
    #[command(about = "Build a source distribution")]
    Sdist,

    /// twine upload dist/*
    #[command(about = "Upload dist/ with twine")]
    Upload,

    /// pip install --editable .
    #[command(about = "Install the package in editable mode")]
    Local,

    /// Create ./venv
    #[command(about = "Create a virtual environment")]
    Venv(VenvArgs),

    /// Manage the Sceleton configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sceleton config init\n\
            \x20 sceleton config get defaults.author\n\
            \x20 sceleton config list"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sceleton completions bash > ~/.local/share/bash-completion/completions/sceleton\n\
            \x20 sceleton completions zsh  > ~/.zfunc/_sceleton\n\
            \x20 sceleton completions fish > ~/.config/fish/completions/sceleton.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether a successful run ends with the closing banner.
    ///
    /// Commands whose stdout is meant to be piped stay silent.
    pub fn announces_done(&self) -> bool {
        !matches!(
            self,
            Self::Completions(_) | Self::Config(ConfigCommands::Get { .. } | ConfigCommands::Path)
        )
    }
}

// ── new / init ────────────────────────────────────────────────────────────────

/// Arguments for `sceleton new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory (and distribution) name, created in the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Add Django app files and the Django requirement.
    #[arg(long = "django", help = "Create a Django app layout")]
    pub django: bool,

    /// Create `venv/` with `python -m venv`.
    #[arg(long = "venv", conflicts_with = "virtualenv", help = "Create a venv")]
    pub venv: bool,

    /// Create `venv/` with `virtualenv`.
    #[arg(long = "virtualenv", help = "Create a virtualenv")]
    pub virtualenv: bool,

    /// Skip the questions and use configured defaults.
    #[arg(long = "quick", help = "Skip questions, use defaults")]
    pub quick: bool,
}

/// Arguments for `sceleton init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to initialise.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to initialise"
    )]
    pub path: PathBuf,

    /// Skip the questions and use configured defaults.
    #[arg(long = "quick", help = "Skip questions, use defaults")]
    pub quick: bool,
}

// ── setup.py editing ──────────────────────────────────────────────────────────

/// One or more requirement specifiers.
#[derive(Debug, Args)]
pub struct PackagesArgs {
    /// Requirement specifiers such as `requests` or `click>=8`.
    #[arg(value_name = "PACKAGES", num_args = 1.., required = true)]
    pub packages: Vec<String>,
}

/// Shared arguments of the metadata commands.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Ask for new values and rewrite setup.py.
    #[arg(short = 'e', long = "edit", help = "Edit instead of printing")]
    pub edit: bool,
}

/// Arguments for `sceleton module`.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Python identifier of the new module.
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for `sceleton venv`.
#[derive(Debug, Args)]
pub struct VenvArgs {
    /// Use `virtualenv` instead of `python -m venv`.
    #[arg(long = "virtualenv", help = "Use virtualenv")]
    pub virtualenv: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sceleton completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `sceleton config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the built-in defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sceleton").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn new_flags() {
        let cli = parse(&["new", "demo", "--django", "--venv", "--quick"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.name, "demo");
                assert!(args.django && args.venv && args.quick);
                assert!(!args.virtualenv);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn venv_and_virtualenv_conflict() {
        let result = Cli::try_parse_from(["sceleton", "new", "demo", "--venv", "--virtualenv"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_requires_packages() {
        assert!(Cli::try_parse_from(["sceleton", "add"]).is_err());

        let cli = parse(&["add", "requests", "click>=8"]);
        match cli.command {
            Commands::Add(args) => assert_eq!(args.packages, ["requests", "click>=8"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_defaults_to_current_dir() {
        match parse(&["init"]).command {
            Commands::Init(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(!args.quick);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["build", "--debug", "-vv"]);
        assert!(cli.global.debug);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Build));
    }

    #[test]
    fn completions_do_not_announce() {
        assert!(!parse(&["completions", "bash"]).command.announces_done());
        assert!(!parse(&["config", "path"]).command.announces_done());
        assert!(parse(&["config", "list"]).command.announces_done());
        assert!(parse(&["license"]).command.announces_done());
    }
}

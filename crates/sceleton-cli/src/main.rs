//! # Sceleton CLI
//!
//! Python package scaffolding.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Validate arguments clap cannot check.
//! 4. Load configuration (defaults + files + env).
//! 5. Wire adapters into services and dispatch to one command handler.
//! 6. Report the outcome.
//!
//! ## Exit codes
//!
//! Failures print a one-line report and exit with 0. With `--debug` the full
//! error is printed and the exit code reflects its category:
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use sceleton_core::application::PackageOp;

use crate::{
    cli::{Cli, Commands, ConfigCommands, OutputFormat},
    commands::{metadata::Field, packaging::Task},
    config::AppConfig,
    context::AppContext,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;
mod output;
mod prompt;

const DONE: &str = "Done. Enjoy :)";

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap's own rendering; --help and --version also land here.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        debug = cli.global.debug,
        "CLI started"
    );

    let debug_mode = cli.global.debug;
    match run(cli) {
        Ok(()) => {
            info!("Sceleton completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, debug_mode),
    }
}

/// Validate, load config, build services and dispatch.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    cli.validate()?;

    let Cli { global, command } = cli;

    // Must work even when the existing config file is unreadable.
    if let Commands::Config(ConfigCommands::Init { force }) = command {
        let defaults = AppConfig::default();
        let output = OutputManager::new(&global, &defaults);
        commands::config::execute(
            ConfigCommands::Init { force },
            &defaults,
            global.config.as_deref(),
            &output,
        )?;
        output.success(DONE)?;
        return Ok(());
    }

    let config = AppConfig::load(global.config.as_deref())?;
    let output = OutputManager::new(&global, &config);
    let announce = command.announces_done() && output.format() != OutputFormat::Json;

    let ctx = AppContext::new(config, global.config)?;
    dispatch(command, &ctx, &output)?;

    if announce {
        output.success(DONE)?;
    }
    Ok(())
}

/// Hand the command to exactly one handler.
fn dispatch(command: Commands, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    match command {
        Commands::New(args) => commands::new::execute(args, ctx, output),
        Commands::Init(args) => commands::init::execute(args, ctx, output),
        Commands::Add(args) => commands::packages::edit(PackageOp::Add, args, ctx, output),
        Commands::Remove(args) => commands::packages::edit(PackageOp::Remove, args, ctx, output),
        Commands::Install(args) => commands::packages::install(args, ctx, output),
        Commands::Classifiers(args) => {
            commands::metadata::execute(Field::Classifiers, args, ctx, output)
        }
        Commands::User(args) => commands::metadata::execute(Field::User, args, ctx, output),
        Commands::License(args) => commands::metadata::execute(Field::License, args, ctx, output),
        Commands::Keywords(args) => {
            commands::metadata::execute(Field::Keywords, args, ctx, output)
        }
        Commands::Module(args) => commands::module::execute(args, ctx, output),
        Commands::Build => commands::packaging::run(Task::Build, ctx, output),
        Commands::Sdist => commands::packaging::run(Task::Sdist, ctx, output),
        Commands::Upload => commands::packaging::run(Task::Upload, ctx, output),
        Commands::Local => commands::packaging::run(Task::Local, ctx, output),
        Commands::Venv(args) => commands::packaging::venv(args, ctx, output),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, &ctx.config, ctx.config_file.as_deref(), output)
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Report a failure.
///
/// Without `--debug` the process still exits with 0 after a one-line
/// message; with it, the full chain and suggestions are printed and the
/// exit code reflects the error category.
fn handle_error(err: CliError, debug_mode: bool) -> ExitCode {
    err.log();

    if !debug_mode {
        eprintln!("{}", err.short_report());
        return ExitCode::SUCCESS;
    }

    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(true)
    } else {
        err.format_plain(true)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn invalid_name_fails_before_config_is_read() {
        let cli = Cli::try_parse_from(["sceleton", "--config", "/missing.toml", "new", ".x"])
            .unwrap();
        assert!(matches!(run(cli), Err(CliError::InvalidProjectName { .. })));
    }
}

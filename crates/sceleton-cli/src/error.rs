//! Errors surfaced by the `sceleton` binary.
//!
//! Everything a command handler can fail with ends up as a [`CliError`].
//! Core failures pass through unchanged; the CLI only adds argument and
//! configuration problems of its own.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, error, warn};

use sceleton_core::{
    domain::DomainError,
    error::{ErrorCategory as CoreCategory, SceletonError},
};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An argument clap accepted but `validate()` did not.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Reading, merging or writing configuration failed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    #[error(transparent)]
    Core(#[from] SceletonError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Core(err.into())
    }
}

impl CliError {
    /// Hints printed under the error in `--debug` mode.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec![
                "Run the command with --help to see what it accepts".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "A project name becomes a directory and a Python package".into(),
                "Try something like 'my-package' or 'my_package'".into(),
            ],
            Self::ConfigError { .. } => vec![
                "'sceleton config path' shows which file was read".into(),
                "'sceleton config init --force' rewrites it with defaults".into(),
                "SCELETON_<SECTION>__<KEY> variables override the file".into(),
            ],
            Self::ConfigExists { path } => vec![
                format!("Edit {} by hand", path.display()),
                "Pass --force to replace it with the defaults".into(),
            ],
            Self::Core(err) => err.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the directory exists and is writable".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidProjectName { .. }
            | Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(err) => match err.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Process exit status under `--debug`: 1 internal, 2 user, 3 not found,
    /// 4 configuration.
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// The single line printed when `--debug` is off.
    pub fn short_report(&self) -> String {
        format!("Something went wrong :(: {self}")
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                warn!(?category, error = %self, "Command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                error!(?category, error = %self, "Command failed");
            }
        }
        for cause in self.causes() {
            debug!(%cause, "Caused by");
        }
    }

    /// Headline, then the source chain when `verbose`, then suggestions.
    fn render(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if colored { style(text) } else { text.to_string() }
        };

        let mut out = String::new();
        let _ = writeln!(out, "\n{}", paint("Error:", |s| s.red().bold().to_string()));
        let _ = writeln!(out, "  {}", paint(&self.to_string(), |s| s.red().to_string()));

        if verbose {
            for cause in self.causes() {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("Caused by: {cause}"), |s| s.dimmed().to_string())
                );
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:", |s| s.yellow().bold().to_string())
            );
            for hint in suggestions {
                let _ = writeln!(out, "  - {hint}");
            }
        }
        out
    }

    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&err| err.source())
            .map(ToString::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

/// Attach a message to a failed `std::io` call.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}

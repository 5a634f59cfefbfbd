//! What the commands print on stdout.
//!
//! Logs go to stderr through `tracing`; this is only the user-facing result.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Header,
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins over `output.format` from the config;
    /// `auto` means human on a terminal and plain otherwise. Only the human
    /// format is coloured.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto => configured_format(&config.output.format),
            flag => flag,
        };
        let format = match format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            concrete => concrete,
        };

        Self {
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            quiet: args.quiet,
            format,
            term: Term::stdout(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.styled(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.styled(Tone::Warning, msg)
    }

    pub fn header(&self, msg: &str) -> io::Result<()> {
        self.styled(Tone::Header, msg)
    }

    /// Written even with `--quiet`: it is the command's result.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    fn styled(&self, tone: Tone, msg: &str) -> io::Result<()> {
        let marker = match tone {
            Tone::Success => "\u{2713} ",
            Tone::Warning => "\u{26a0} ",
            Tone::Header => "",
        };
        let line = if self.no_color {
            format!("{marker}{msg}")
        } else {
            match tone {
                Tone::Success => format!("{}{}", marker.green().bold(), msg.green()),
                Tone::Warning => format!("{}{}", marker.yellow().bold(), msg.yellow()),
                Tone::Header => msg.cyan().bold().to_string(),
            }
        };
        self.print(&line)
    }
}

/// `output.format` from the config; anything unrecognised counts as auto.
fn configured_format(name: &str) -> OutputFormat {
    OutputFormat::from_str(name.trim(), true).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            output_format: format,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_print_is_a_no_op() {
        let args = GlobalArgs {
            quiet: true,
            ..GlobalArgs::default()
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn only_human_is_coloured() {
        assert!(manager(OutputFormat::Plain).no_color);
        assert!(manager(OutputFormat::Json).no_color);
        assert!(!manager(OutputFormat::Human).no_color);
    }

    #[test]
    fn flag_beats_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            output_format: OutputFormat::Plain,
            ..GlobalArgs::default()
        };
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Plain);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "JSON".into();
        let out = OutputManager::new(&GlobalArgs::default(), &config);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn unknown_config_format_is_auto() {
        assert_eq!(configured_format("fancy"), OutputFormat::Auto);
        assert_eq!(configured_format(" plain "), OutputFormat::Plain);
    }
}

//! `sceleton config`: inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `explicit` is the `--config` path, which takes the place of the default
/// location for `init` and `path`.
pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    explicit: Option<&Path>,
    output: &OutputManager,
) -> CliResult<()> {
    let target = explicit.map_or_else(AppConfig::config_path, Path::to_path_buf);

    match cmd {
        ConfigCommands::Init { force } => {
            write_default(&target, force)?;
            output.success(&format!("Configuration created at {}", target.display()))?;
        }

        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.format() == OutputFormat::Json {
                output.json(&serde_json::json!({ key: value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                let value = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.json(&value)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&config.to_toml()?)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&target.display().to_string())?;
        }
    }

    Ok(())
}

fn write_default(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let text = AppConfig::default().to_toml()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/config.toml");

        write_default(&path, false).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.python, "python3");
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nauthor = \"me\"\n").unwrap();

        assert!(matches!(
            write_default(&path, false),
            Err(CliError::ConfigExists { .. })
        ));
        write_default(&path, true).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("\"me\""));
    }
}

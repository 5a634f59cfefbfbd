//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `SCELETON_<SECTION>__<KEY>`
//! 3. `.sceleton.toml` in the current directory
//! 4. Config file (`--config`, or the platform config directory)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sceleton_core::{
    application::VenvTool,
    domain::{License, ProjectDescriptor},
};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "SCELETON";
const LOCAL_FILE: &str = ".sceleton.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub email: String,
    pub url: String,
    pub version: String,
    pub license: License,
    /// Interpreter used for `setup.py`, `pip` and `venv`.
    pub python: String,
    /// Prefer `virtualenv` over `python -m venv`.
    pub virtualenv: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose `*.tmpl` files replace the bundled ones.
    pub local_path: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: String::new(),
            email: String::new(),
            url: String::new(),
            version: "0.1.0".into(),
            license: License::default(),
            python: "python3".into(),
            virtualenv: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Defaults {
    /// Descriptor for `name` filled from the configured defaults.
    pub fn descriptor(&self, name: &str) -> ProjectDescriptor {
        ProjectDescriptor::new(name)
            .with_author(self.author.as_str(), self.email.as_str())
            .with_version(self.version.as_str())
            .with_url(self.url.as_str())
            .with_license(self.license)
    }

    /// Tool for a requested virtual environment.
    pub fn venv_tool(&self, force_virtualenv: bool) -> VenvTool {
        if force_virtualenv || self.virtualenv {
            VenvTool::Virtualenv
        } else {
            VenvTool::Venv
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
            }
            None => builder.add_source(
                File::from(Self::config_path())
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        builder
            .add_source(
                File::from(Path::new(LOCAL_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sceleton.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sceleton", "sceleton")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_FILE))
    }

    /// Pretty TOML, as written by `config init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Value of a dotted `section.key`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = match key {
            "defaults.author" => self.defaults.author.clone(),
            "defaults.email" => self.defaults.email.clone(),
            "defaults.url" => self.defaults.url.clone(),
            "defaults.version" => self.defaults.version.clone(),
            "defaults.license" => self.defaults.license.name().to_string(),
            "defaults.python" => self.defaults.python.clone(),
            "defaults.virtualenv" => self.defaults.virtualenv.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "templates.local_path" => self
                .templates
                .local_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => {
                return Err(CliError::ConfigError {
                    message: format!("Unknown config key: '{key}'"),
                    source: None,
                });
            }
        };
        Ok(value)
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_license_is_mit() {
        assert_eq!(AppConfig::default().defaults.license, License::Mit);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[defaults]\nauthor = \"Ada Lovelace\"\nlicense = \"Apache-2.0\"\n"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.defaults.author, "Ada Lovelace");
        assert_eq!(cfg.defaults.license, License::Apache2);
        assert_eq!(cfg.defaults.python, "python3");
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn unknown_license_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[defaults]\nlicense = \"WTFPL\"\n").unwrap();

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.license").unwrap(), "MIT License");
        assert_eq!(cfg.get("output.no_color").unwrap(), "false");
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn toml_round_trips_through_serde() {
        let text = AppConfig::default().to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.defaults.version, "0.1.0");
        assert_eq!(parsed.defaults.license, License::Mit);
    }

    #[test]
    fn venv_tool_prefers_flag_then_config() {
        let mut defaults = Defaults::default();
        assert_eq!(defaults.venv_tool(false), VenvTool::Venv);
        assert_eq!(defaults.venv_tool(true), VenvTool::Virtualenv);
        defaults.virtualenv = true;
        assert_eq!(defaults.venv_tool(false), VenvTool::Virtualenv);
    }

    #[test]
    fn descriptor_uses_defaults() {
        let mut defaults = Defaults::default();
        defaults.author = "Ada".into();
        let d = defaults.descriptor("demo");
        assert_eq!(d.author, "Ada");
        assert_eq!(d.version, "0.1.0");
        assert_eq!(d.license, License::Mit);
    }
}

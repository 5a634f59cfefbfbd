//! Argument checks that run after parsing and before dispatch.

use sceleton_core::domain::DomainValidator;

use crate::{
    cli::{Cli, Commands, PackagesArgs},
    error::{CliError, CliResult},
};

impl Cli {
    /// Reject names and lists no handler could work with.
    pub fn validate(&self) -> CliResult<()> {
        match &self.command {
            Commands::New(args) => validate_project_name(&args.name),
            Commands::Module(args) => validate_module_name(&args.name),
            Commands::Add(args) | Commands::Remove(args) | Commands::Install(args) => {
                validate_packages(args)
            }
            _ => Ok(()),
        }
    }
}

pub fn validate_project_name(name: &str) -> CliResult<()> {
    let reason = if name.trim().is_empty() {
        "name cannot be empty"
    } else if name.starts_with('.') {
        "name cannot start with '.'"
    } else if name.contains('/') || name.contains('\\') {
        "name cannot contain path separators"
    } else {
        return Ok(());
    };

    Err(CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    })
}

fn validate_module_name(name: &str) -> CliResult<()> {
    validate_project_name(name)?;
    DomainValidator::validate_package_name(name).map_err(|e| CliError::InvalidInput {
        message: format!("'{name}' is not a valid module name"),
        source: Some(Box::new(e)),
    })
}

fn validate_packages(args: &PackagesArgs) -> CliResult<()> {
    if let Some(blank) = args.packages.iter().find(|p| p.trim().is_empty()) {
        return Err(CliError::InvalidInput {
            message: format!("empty package name {blank:?}"),
            source: None,
        });
    }
    if args.packages.is_empty() {
        return Err(CliError::InvalidInput {
            message: "no packages given".into(),
            source: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sceleton").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate_project_name(""),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn dotfile_name_is_invalid() {
        assert!(matches!(
            validate_project_name(".hidden"),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn path_separator_in_name_is_invalid() {
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("a\\b").is_err());
    }

    #[test]
    fn valid_names_pass() {
        for name in ["my-project", "my_app", "project123", "MyApp", "sceleton"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn module_must_be_identifier() {
        assert!(cli(&["module", "utils"]).validate().is_ok());
        assert!(matches!(
            cli(&["module", "my-utils"]).validate(),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn blank_package_is_rejected() {
        assert!(cli(&["add", "requests", " "]).validate().is_err());
        assert!(cli(&["remove", "requests"]).validate().is_ok());
    }

    #[test]
    fn new_checks_name() {
        assert!(cli(&["new", ".demo"]).validate().is_err());
        assert!(cli(&["new", "demo"]).validate().is_ok());
    }
}

//! `sceleton init`: add `setup.py` and friends to an existing directory.

use std::path::Path;

use tracing::instrument;

use crate::{
    cli::{InitArgs, validate::validate_project_name},
    context::AppContext,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: InitArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let dir = args.path.as_path();
    if !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", dir.display()),
            source: None,
        });
    }

    let name = project_name(dir)?;
    validate_project_name(&name)?;

    let mut descriptor = ctx.config.defaults.descriptor(&name);
    if !args.quick {
        descriptor = super::new::ask(descriptor, ctx)?;
    }

    ctx.assembler.create_setup_py(&descriptor, dir)?;
    output.success(&format!("setup.py written to {}", dir.display()))?;
    Ok(())
}

/// Name of the directory, resolving `.` and `..`.
fn project_name(dir: &Path) -> CliResult<String> {
    let absolute = dir
        .canonicalize()
        .with_cli_context(|| format!("cannot resolve '{}'", dir.display()))?;

    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidProjectName {
            name: absolute.display().to_string(),
            reason: "cannot extract a project name from the directory".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_comes_from_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("my-lib");
        std::fs::create_dir(&dir).unwrap();

        assert_eq!(project_name(&dir).unwrap(), "my-lib");
        assert_eq!(project_name(&dir.join(".")).unwrap(), "my-lib");
    }

    #[test]
    fn missing_directory_is_io_error() {
        assert!(matches!(
            project_name(Path::new("/no/such/dir")),
            Err(CliError::IoError { .. })
        ));
    }
}

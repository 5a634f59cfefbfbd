//! `sceleton build | sdist | upload | local | venv`.

use tracing::instrument;

use crate::{
    cli::VenvArgs, context::AppContext, error::CliResult, output::OutputManager,
};

/// Which wrapper to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Build,
    Sdist,
    Upload,
    Local,
}

#[instrument(skip(ctx, output))]
pub fn run(task: Task, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let dir = ctx.dir();
    match task {
        Task::Build => ctx.packaging.build(dir)?,
        Task::Sdist => ctx.packaging.sdist(dir)?,
        Task::Upload => ctx.packaging.upload(dir)?,
        Task::Local => ctx.packaging.local(dir)?,
    }
    output.success(match task {
        Task::Build => "Source and wheel distributions built in dist/",
        Task::Sdist => "Source distribution built in dist/",
        Task::Upload => "dist/ uploaded",
        Task::Local => "Installed in editable mode",
    })?;
    Ok(())
}

#[instrument(skip_all)]
pub fn venv(args: VenvArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let tool = ctx.config.defaults.venv_tool(args.virtualenv);
    ctx.packaging.venv(ctx.dir(), tool)?;
    output.success("Virtual environment created in venv/")?;
    output.print("Activate it with: source venv/bin/activate")?;
    Ok(())
}

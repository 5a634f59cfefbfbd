//! `sceleton module <name>`.

use tracing::instrument;

use crate::{cli::ModuleArgs, context::AppContext, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(module = %args.name))]
pub fn execute(args: ModuleArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let path = ctx.assembler.create_module(&args.name, ctx.dir())?;
    output.success(&format!("Module created at {}", path.display()))?;
    Ok(())
}

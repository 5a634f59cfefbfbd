//! Implementation of the `sceleton new` command.

use tracing::{info, instrument};

use sceleton_core::{
    application::{Questionnaire, VenvTool},
    domain::ProjectDescriptor,
};

use crate::{
    cli::NewArgs, context::AppContext, error::CliResult, output::OutputManager,
    prompt::terminal_prompter,
};

/// Execute `sceleton new`.
///
/// 1. Build the descriptor from config defaults
/// 2. Ask the questionnaire unless `--quick`
/// 3. Create the project (git init, optional venv)
/// 4. Print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let mut descriptor = ctx.config.defaults.descriptor(&args.name);
    if args.django {
        descriptor = descriptor.with_django();
    }
    if !args.quick {
        descriptor = ask(descriptor, ctx)?;
    }

    let venv = venv_tool(&args, ctx);

    output.header(&format!("Creating '{}'...", descriptor.name))?;
    let root = ctx
        .assembler
        .create_project(&descriptor, ctx.dir(), venv)?;
    info!(path = %root.display(), "Project created");

    output.success(&format!("Package '{}' created", descriptor.name))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", descriptor.name))?;
    if venv.is_some() {
        output.print("  source venv/bin/activate")?;
    }
    output.print("  sceleton local")?;
    Ok(())
}

pub(crate) fn ask(base: ProjectDescriptor, ctx: &AppContext) -> CliResult<ProjectDescriptor> {
    let prompter = terminal_prompter();
    let questionnaire = Questionnaire::new(prompter.as_ref(), &ctx.catalog);
    Ok(questionnaire.descriptor(base)?)
}

fn venv_tool(args: &NewArgs, ctx: &AppContext) -> Option<VenvTool> {
    (args.venv || args.virtualenv).then(|| ctx.config.defaults.venv_tool(args.virtualenv))
}

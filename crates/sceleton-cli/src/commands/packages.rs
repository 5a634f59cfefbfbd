//! `sceleton add | remove | install`: maintain `install_requires`.

use tracing::instrument;

use sceleton_core::{application::PackageOp, domain::setup_py::requirement_name};

use crate::{
    cli::PackagesArgs, context::AppContext, error::CliResult, output::OutputManager,
};

#[instrument(skip_all, fields(op = ?op, count = args.packages.len()))]
pub fn edit(
    op: PackageOp,
    args: PackagesArgs,
    ctx: &AppContext,
    output: &OutputManager,
) -> CliResult<()> {
    let changed = ctx.editor.packages(op, &args.packages, &ctx.setup_py())?;
    report(op, &args.packages, &changed, output)
}

/// pip install, then record the packages.
#[instrument(skip_all, fields(count = args.packages.len()))]
pub fn install(args: PackagesArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    ctx.packaging.pip_install(ctx.dir(), &args.packages)?;
    let changed = ctx
        .editor
        .packages(PackageOp::Add, &args.packages, &ctx.setup_py())?;
    report(PackageOp::Add, &args.packages, &changed, output)
}

fn report(
    op: PackageOp,
    requested: &[String],
    changed: &[String],
    output: &OutputManager,
) -> CliResult<()> {
    let verb = match op {
        PackageOp::Add => "Added",
        PackageOp::Remove => "Removed",
    };
    for name in changed {
        output.success(&format!("{verb} {name}"))?;
    }
    let touched: Vec<String> = changed.iter().map(|c| requirement_name(c)).collect();
    for name in requested
        .iter()
        .filter(|r| !touched.contains(&requirement_name(r)))
    {
        let note = match op {
            PackageOp::Add => "already listed",
            PackageOp::Remove => "not listed",
        };
        output.warning(&format!("{name}: {note} in install_requires"))?;
    }
    Ok(())
}

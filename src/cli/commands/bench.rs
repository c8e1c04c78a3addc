//! bench command - Generate a tree, build it, and time the build

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::generate::{print_tree, write_tree, TreeReport, TreeSettings};
use super::Context;
use crate::cli::args::TreeArgs;
use crate::runner::{RunReport, SystemRunner};

/// Generate a tree and drive the external build over it.
///
/// A missing CMTROOT is reported before anything is written.
pub fn bench(ctx: &Context, args: &TreeArgs, cmt_root: Option<PathBuf>) -> Result<()> {
    let config = ctx.load_config()?;
    let settings = TreeSettings::resolve(args, &config)?;
    let gen = settings.build(ctx.output)?;

    let cmt_root = cmt_root.or_else(|| config.cmt_root().map(PathBuf::from));
    let env = gen.build_env(cmt_root)?;
    ctx.output.debug(format_args!(
        "CMTROOT={} CMTPROJECTPATH={}",
        env.cmt_root.display(),
        env.project_path.display()
    ));

    let fingerprint = write_tree(ctx, &gen)?;
    let report = gen
        .run(&SystemRunner::new(), &env)
        .with_context(|| format!("build of '{}' failed", gen.dir().display()))?;

    if args.json {
        let report = TreeReport {
            seed: settings.seed,
            fingerprint: fingerprint.to_string(),
            tree: gen.summary(),
            run: Some(report),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_tree(ctx, &settings, &gen, &fingerprint);
        print_report(ctx, &report);
    }

    Ok(())
}

fn print_report(ctx: &Context, report: &RunReport) {
    for step in &report.steps {
        ctx.output.print(format_args!(
            "  {:<10} {:>9.3}s  {}",
            step.name,
            step.elapsed.as_secs_f64(),
            step.command
        ));
    }
    ctx.output.print(format_args!(
        "  {:<10} {:>9.3}s",
        "total",
        report.total().as_secs_f64()
    ));
}

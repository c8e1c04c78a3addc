//! generate command - Write a synthetic project tree

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::Context;
use crate::cli::args::TreeArgs;
use crate::core::config::Config;
use crate::core::mode::Mode;
use crate::core::types::TreeFingerprint;
use crate::core::uses::UsesList;
use crate::runner::RunReport;
use crate::tree::{Generator, TreeSummary};
use crate::ui::output::Output;

/// Tree shape after merging flags over the config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSettings {
    pub mode: Mode,
    pub dir: PathBuf,
    pub projects: usize,
    pub packages: usize,
    pub uses: UsesList,
    pub seed: u64,
}

impl TreeSettings {
    /// Flags win over the config file, which wins over defaults. An unset
    /// seed is drawn at random.
    pub fn resolve(args: &TreeArgs, config: &Config) -> Result<Self> {
        let uses = match &args.uses {
            Some(list) => UsesList::parse(list).context("invalid --uses")?,
            None => config.uses(),
        };

        Ok(Self {
            mode: args.mode.unwrap_or_else(|| config.mode()),
            dir: args.dir.clone().unwrap_or_else(|| config.dir()),
            projects: args.nprojs.unwrap_or_else(|| config.projects()),
            packages: args.npkgs.unwrap_or_else(|| config.packages()),
            uses,
            seed: args.seed.or(config.seed()).unwrap_or_else(rand::random),
        })
    }

    /// Build the in-memory tree. Nothing is written.
    pub fn build(&self, output: Output) -> Result<Generator> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let gen = Generator::new(
            self.mode,
            &self.dir,
            self.projects,
            self.packages,
            self.uses.clone(),
            &mut rng,
        )
        .context("invalid tree settings")?;
        Ok(gen.with_output(output))
    }
}

/// JSON report of a generated tree.
#[derive(Debug, Serialize)]
pub(super) struct TreeReport {
    pub seed: u64,
    pub fingerprint: String,
    pub tree: TreeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunReport>,
}

/// Write a built tree to disk and fingerprint the result.
pub(super) fn write_tree(ctx: &Context, gen: &Generator) -> Result<TreeFingerprint> {
    for project in gen.projects() {
        ctx.output.debug(format_args!(
            ":: creating project {} ({} packages)",
            project.name(),
            project.packages().len()
        ));
    }
    for used in gen.uses().packages() {
        let wired = gen
            .projects()
            .iter()
            .flat_map(|p| p.packages())
            .any(|pkg| pkg.uses().iter().any(|u| &u.name == used));
        if !wired {
            ctx.output.warn(format_args!(
                "uses entry {} added no edges: no project has a package after it",
                used
            ));
        }
    }

    gen.generate()
        .with_context(|| format!("failed to generate tree in '{}'", gen.dir().display()))?;
    gen.fingerprint().context("failed to fingerprint tree")
}

/// Print the human-readable summary of a written tree.
pub(super) fn print_tree(
    ctx: &Context,
    settings: &TreeSettings,
    gen: &Generator,
    fp: &TreeFingerprint,
) {
    ctx.output.print(format_args!(
        "Generated {} project(s) with {} package(s) in {}",
        gen.projects().len(),
        gen.package_count(),
        gen.dir().display()
    ));
    ctx.output.print(format_args!(
        "  mode {}, seed {}, uses {}",
        settings.mode, settings.seed, settings.uses
    ));
    ctx.output.print(format_args!("  fingerprint {}", fp.short()));
}

/// Generate a tree.
pub fn generate(ctx: &Context, args: &TreeArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let settings = TreeSettings::resolve(args, &config)?;
    let gen = settings.build(ctx.output)?;
    let fingerprint = write_tree(ctx, &gen)?;

    if args.json {
        let report = TreeReport {
            seed: settings.seed,
            fingerprint: fingerprint.to_string(),
            tree: gen.summary(),
            run: None,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_tree(ctx, &settings, &gen, &fingerprint);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FileConfig;

    fn config(file: FileConfig) -> Config {
        let mut config = Config::default();
        config.file = file;
        config
    }

    #[test]
    fn flags_override_config() {
        let cfg = config(FileConfig {
            projects: Some(4),
            packages: Some(9),
            uses: Some(vec!["Pkg_0002".to_string()]),
            seed: Some(1),
            ..Default::default()
        });
        let args = TreeArgs {
            npkgs: Some(3),
            uses: Some("Pkg_0001".to_string()),
            seed: Some(5),
            ..Default::default()
        };

        let settings = TreeSettings::resolve(&args, &cfg).unwrap();
        assert_eq!(settings.projects, 4);
        assert_eq!(settings.packages, 3);
        assert_eq!(settings.uses, UsesList::parse("Pkg_0001").unwrap());
        assert_eq!(settings.seed, 5);
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let settings = TreeSettings::resolve(&TreeArgs::default(), &Config::default()).unwrap();
        assert_eq!(settings.mode, Mode::CMake);
        assert_eq!(settings.projects, 1);
        assert_eq!(settings.packages, 5);
        assert!(settings.uses.is_empty());
        assert_eq!(settings.dir, PathBuf::from("test"));
    }

    #[test]
    fn malformed_uses_flag_rejected() {
        let args = TreeArgs {
            uses: Some("Pkg_1".to_string()),
            ..Default::default()
        };
        assert!(TreeSettings::resolve(&args, &Config::default()).is_err());
    }

    #[test]
    fn same_seed_same_tree() {
        let temp = tempfile::TempDir::new().unwrap();
        let args = TreeArgs {
            dir: Some(temp.path().to_path_buf()),
            nprojs: Some(3),
            npkgs: Some(6),
            seed: Some(77),
            ..Default::default()
        };
        let settings = TreeSettings::resolve(&args, &Config::default()).unwrap();

        let a = settings.build(Output::quiet()).unwrap().summary();
        let b = settings.build(Output::quiet()).unwrap().summary();
        assert_eq!(a, b);
    }
}

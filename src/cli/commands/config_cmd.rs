//! config command - Show or initialize configuration

use anyhow::{Context as _, Result};

use super::Context;
use crate::core::config::{Config, FileConfig};

/// Effective values, as a config file would spell them.
fn effective(config: &Config) -> FileConfig {
    FileConfig {
        mode: Some(config.mode().to_string()),
        projects: Some(config.projects()),
        packages: Some(config.packages()),
        uses: Some(config.uses().entries().iter().map(ToString::to_string).collect()),
        dir: Some(config.dir()),
        seed: config.seed(),
        cmt_root: config.cmt_root().map(Into::into),
    }
}

/// Print the effective configuration.
pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match config.loaded_from() {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# no config file found; showing defaults"),
    }
    let contents = toml::to_string_pretty(&effective(&config))
        .context("failed to serialize configuration")?;
    print!("{}", contents);

    Ok(())
}

/// Print the path of the loaded config file.
pub fn path(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match config.loaded_from() {
        Some(path) => println!("{}", path.display()),
        None => {
            let canonical = Config::default_config_path()?;
            ctx.output.print(format_args!(
                "no config file found (default location: {})",
                canonical.display()
            ));
        }
    }

    Ok(())
}

/// Write a config file holding the defaults.
///
/// Writes to `--config` if given, else the canonical location. An
/// existing file is never replaced.
pub fn init(ctx: &Context) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };

    Config::write_new(&path, &effective(&Config::default()))
        .with_context(|| format!("failed to initialize config at '{}'", path.display()))?;

    ctx.output
        .print(format_args!("Wrote default config to {}", path.display()));
    Ok(())
}

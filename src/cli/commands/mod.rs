//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the config file and merges its own flags over it
//! 2. Calls the generator to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT write generated files directly.

mod bench;
mod completion;
mod config_cmd;
mod generate;

// Re-export command functions for testing and direct invocation
pub use bench::bench;
pub use completion::completion;
pub use config_cmd::{init as config_init, path as config_path, show as config_show};
pub use generate::{generate, TreeSettings};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::ui::output::Output;

/// Execution context built from the global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Explicit `--config` path
    pub config_path: Option<PathBuf>,
    /// Output sink for the run
    pub output: Output,
}

impl Context {
    /// Load the config file named by `--config`, or search the defaults.
    pub fn load_config(&self) -> Result<Config> {
        let config = Config::load(self.config_path.as_deref()).context("failed to load config")?;
        if let Some(path) = config.loaded_from() {
            self.output
                .debug(format_args!("loaded config from {}", path.display()));
        }
        Ok(config)
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Generate(args) => generate::generate(ctx, &args),
        Command::Bench { tree, cmt_root } => bench::bench(ctx, &tree, cmt_root),
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
            ConfigAction::Init => config_cmd::init(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Merge flags over the config file and defaults
//! - Delegate to command handlers
//! - Does NOT write generated files directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the [`crate::tree`] generator. Every filesystem change flows through
//! the generator's writer.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::ui::output::{Output, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = commands::Context {
        config_path: cli.config.clone(),
        output: Output::new(Verbosity::from_flags(cli.quiet, cli.debug)),
    };

    commands::dispatch(cli.command, &ctx)
}

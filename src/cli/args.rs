//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--debug` / `--verbose`: Debug logging, build tool output forwarded
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::mode::Mode;

/// cmt-gen-bench - Generate synthetic CMT project trees and time their builds
#[derive(Parser, Debug)]
#[command(name = "cmt-gen-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging and forward build tool output
    #[arg(long, visible_alias = "verbose", global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a project tree
    #[command(
        name = "generate",
        long_about = "Generate a synthetic tree of CMT projects and packages.\n\n\
            Each project gets a random number of packages between 1 and --npkgs. \
            Every package holds a one-class C++ library, a test program, a CMT \
            requirements file, and a build descriptor. Any previous output of the \
            generated projects is removed first.",
        after_help = "\
EXAMPLES:
    # Two projects of up to three packages each, in ./test
    cmt-gen-bench generate --nprojs 2 --npkgs 3

    # Every package uses Pkg_0001 of its own project
    cmt-gen-bench generate --npkgs 10 --uses Pkg_0001

    # Reproducible tree, described as JSON
    cmt-gen-bench generate --seed 42 --json"
    )]
    Generate(TreeArgs),

    /// Generate a project tree, then build it and report timings
    #[command(
        name = "bench",
        long_about = "Generate a tree exactly as `generate` does, then build it.\n\n\
            The build runs `cmake <dir>` and `cmake --build .` inside <dir>/build \
            with CMTROOT and CMTPROJECTPATH set, and reports the wall-clock time \
            of each step. The first failing step aborts the run.",
        after_help = "\
EXAMPLES:
    # Build a generated tree against a local CMT installation
    cmt-gen-bench bench --cmt-root /opt/cmt --nprojs 3 --npkgs 20

    # Show the build tool's own output
    cmt-gen-bench --debug bench --cmt-root /opt/cmt"
    )]
    Bench {
        #[command(flatten)]
        tree: TreeArgs,

        /// Location of the CMT CMake macros (default: config, then $CMTROOT)
        #[arg(long, value_name = "PATH")]
        cmt_root: Option<PathBuf>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    cmt-gen-bench completion bash >> ~/.bashrc

    # Fish
    cmt-gen-bench completion fish > ~/.config/fish/completions/cmt-gen-bench.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Tree shape options shared by `generate` and `bench`.
///
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeArgs {
    /// Build system flavor
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Number of projects
    #[arg(long, value_name = "N")]
    pub nprojs: Option<usize>,

    /// Maximum number of packages per project
    #[arg(long, value_name = "N")]
    pub npkgs: Option<usize>,

    /// Comma-separated uses list (e.g. "Pkg_0001,Proj_0000")
    #[arg(long, value_name = "LIST")]
    pub uses: Option<String>,

    /// Output directory
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Seed for package counts and prefixes (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the path of the loaded config file
    Path,
    /// Write a config file holding the defaults
    Init,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

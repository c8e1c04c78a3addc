//! cmtgen - Synthetic CMT project trees for build system benchmarking
//!
//! Generates a configurable number of CMT projects, each holding a random
//! number of packages. Every package is a small C++ library plus a test
//! program, with a CMT `requirements` manifest and a build descriptor.
//! Packages and projects may use one another, producing a dependency
//! graph for the build tool to resolve. The generated tree can then be
//! built and timed.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to tree)
//! - [`tree`] - Generator, projects, packages, and the four-phase pipeline
//! - [`templates`] - Pure renderers for every generated file
//! - [`runner`] - Boundary to the external build tool
//! - [`core`] - Domain types, uses list, paths, and configuration
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. The tree, including every dependency edge, is fixed before any file
//!    is written
//! 2. All filesystem mutations flow through a single writer
//! 3. The same seed and inputs always produce the same tree
//! 4. The uses graph is acyclic

pub mod cli;
pub mod core;
pub mod runner;
pub mod templates;
pub mod tree;
pub mod ui;

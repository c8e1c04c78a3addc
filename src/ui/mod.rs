//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output sink, verbosity, and formatting
//!
//! # Design
//!
//! All progress and diagnostic output goes through this module so quiet,
//! normal, and debug modes behave the same everywhere.

pub mod output;

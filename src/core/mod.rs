//! core
//!
//! Core domain types and configuration for the generator.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ProjectName, PackageName, Prefix, etc.
//! - [`mode`] - Supported build system flavors
//! - [`uses`] - The uses list and its parsing rules
//! - [`graph`] - Package dependency graph and cycle detection
//! - [`paths`] - Centralized path routing for generated trees
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid names at construction time
//! - Schemas are strict and self-describing
//! - Nothing here touches the generated tree on disk

pub mod config;
pub mod graph;
pub mod mode;
pub mod paths;
pub mod types;
pub mod uses;

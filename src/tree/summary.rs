//! tree::summary
//!
//! Serializable view of a generated tree, for `--json` output.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::mode::Mode;
use crate::core::types::{PackageName, ProjectName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    pub mode: Mode,
    pub root: PathBuf,
    /// Uses list entries the tree was wired from.
    pub uses: Vec<String>,
    pub projects: Vec<ProjectSummary>,
}

impl TreeSummary {
    pub fn package_count(&self) -> usize {
        self.projects.iter().map(|p| p.packages.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: ProjectName,
    pub uses: Vec<ProjectName>,
    pub packages: Vec<PackageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub name: PackageName,
    /// Name including the prefix, e.g. `Pre/Fix/Pkg_0002`.
    pub full_name: String,
    /// Full names of used packages.
    pub uses: Vec<String>,
}

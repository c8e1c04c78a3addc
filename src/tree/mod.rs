//! tree
//!
//! The generated project/package hierarchy and the pipeline that writes it.
//!
//! # Architecture
//!
//! ```text
//! Generator ──owns──> Project ──owns──> Package ──uses──> PackageRef
//! ```
//!
//! The [`Generator`] drives four strictly ordered phases:
//!
//! 1. **Cleanup** - remove any previous output of each project
//! 2. **Structure** - create every directory, write the top-level descriptor
//! 3. **Generate** - write header, source, test, and manifest per package
//! 4. **Config** - write the project and package descriptors
//!
//! then, on request, [`Generator::run`] drives the external build tool.
//!
//! # Invariants
//!
//! - The tree is fully built (including every uses edge) in
//!   [`Generator::new`] and is read-only afterwards.
//! - Every filesystem side effect goes through [`TreeWriter`].
//! - The first error aborts the pipeline; nothing is rolled back. A
//!   partially written tree is discarded by the next run's cleanup.

pub mod generator;
pub mod package;
pub mod project;
pub mod summary;
pub mod writer;

pub use generator::Generator;
pub use package::Package;
pub use project::Project;
pub use summary::TreeSummary;
pub use writer::TreeWriter;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::mode::ModeError;
use crate::core::types::{PackageRef, TypeError};
use crate::core::uses::UsesError;
use crate::runner::RunnerError;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    Remove,
    Write,
    Read,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FsOp::CreateDir => "create directory",
            FsOp::Remove => "remove",
            FsOp::Write => "write",
            FsOp::Read => "read",
        };
        f.write_str(s)
    }
}

/// Errors from building, writing, or running a generated tree.
#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    Uses(#[from] UsesError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("invalid output directory '{path}': {reason}")]
    InvalidOutputDir { path: PathBuf, reason: String },

    #[error("package count must be at least 1")]
    NoPackages,

    #[error("duplicate project name '{0}'")]
    DuplicateProject(String),

    #[error("duplicate package '{0}'")]
    DuplicatePackage(PackageRef),

    #[error("package '{package}' uses '{used}', which is not part of the tree")]
    DanglingUse { package: PackageRef, used: PackageRef },

    #[error("uses graph contains a cycle: {}", format_cycle(.0))]
    Cycle(Vec<PackageRef>),

    #[error("no generated tree at '{0}'; run generate first")]
    NotGenerated(PathBuf),

    #[error("failed to {op} '{path}': {source}")]
    Io {
        op: FsOp,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

fn format_cycle(cycle: &[PackageRef]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PackageName, Prefix, ProjectName};

    #[test]
    fn cycle_message_lists_path() {
        let a = PackageRef::new(ProjectName::indexed(0), Prefix::None, PackageName::indexed(1));
        let b = PackageRef::new(ProjectName::indexed(0), Prefix::Nested, PackageName::indexed(2));
        let err = GenError::Cycle(vec![a.clone(), b, a]);

        assert_eq!(
            err.to_string(),
            "uses graph contains a cycle: Proj_0000/Pkg_0001 -> Proj_0000/Pre/Fix/Pkg_0002 -> Proj_0000/Pkg_0001"
        );
    }

    #[test]
    fn io_message_names_operation_and_path() {
        let err = GenError::Io {
            op: FsOp::CreateDir,
            path: PathBuf::from("/out/Proj_0000"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to create directory '/out/Proj_0000': denied"
        );
    }
}

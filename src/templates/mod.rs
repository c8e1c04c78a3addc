//! templates
//!
//! Stateless rendering of every generated artifact.
//!
//! # Design
//!
//! Each artifact kind is a pure function from a context to the full file
//! text. Nothing here touches the filesystem; the tree module decides
//! where the text goes. A context is always built from an already
//! constructed, validated tree, so rendering cannot fail.
//!
//! A used package is rendered into four artifacts of its user: the header
//! (include + member field), the library source (call), the manifest
//! (`use` + link options), and the package descriptor. That repetition is
//! what makes the generated tree exercise real include and link
//! resolution when it is built.
//!
//! # Modules
//!
//! - [`cxx`] - Header, library source, and test program
//! - [`requirements`] - CMT `requirements` manifest
//! - [`cmake`] - CMake descriptors (root, project, package)

pub mod cmake;
pub mod cxx;
pub mod requirements;

use std::path::Path;

use crate::core::mode::Mode;
use crate::core::types::{PackageRef, ProjectName};

/// Kinds of per-package artifact produced in the generate phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Header,
    Source,
    Test,
    Manifest,
}

impl Artifact {
    /// All per-package artifacts in emission order.
    pub const ALL: [Artifact; 4] = [
        Artifact::Header,
        Artifact::Source,
        Artifact::Test,
        Artifact::Manifest,
    ];
}

/// Template context for a single package.
#[derive(Debug, Clone, Copy)]
pub struct PackageContext<'a> {
    pub package: &'a PackageRef,
    /// Used packages, in Uses order.
    pub uses: &'a [PackageRef],
}

impl<'a> PackageContext<'a> {
    pub fn new(package: &'a PackageRef, uses: &'a [PackageRef]) -> Self {
        Self { package, uses }
    }

    /// The package's own name.
    pub fn name(&self) -> &'a str {
        self.package.name.as_str()
    }

    /// Names of the used packages, in Uses order.
    pub fn use_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.uses.iter().map(|u| u.name.as_str())
    }
}

/// Template context for a project descriptor.
#[derive(Debug, Clone, Copy)]
pub struct ProjectContext<'a> {
    pub name: &'a ProjectName,
    /// Projects this project uses, in order.
    pub uses: &'a [ProjectName],
    /// Contained packages, in order.
    pub packages: &'a [PackageRef],
}

/// Template context for the top-level descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RootContext<'a> {
    /// Absolute output root; the default project search path.
    pub root: &'a Path,
    pub projects: &'a [ProjectName],
}

/// Render a per-package artifact.
pub fn render_artifact(artifact: Artifact, ctx: &PackageContext<'_>) -> String {
    match artifact {
        Artifact::Header => cxx::header(ctx),
        Artifact::Source => cxx::source(ctx),
        Artifact::Test => cxx::test_program(ctx),
        Artifact::Manifest => requirements::manifest(ctx),
    }
}

/// Render the package-level descriptor for `mode`.
pub fn package_descriptor(mode: Mode, ctx: &PackageContext<'_>) -> String {
    match mode {
        Mode::CMake => cmake::package(ctx),
    }
}

/// Render the project-level descriptor for `mode`.
pub fn project_descriptor(mode: Mode, ctx: &ProjectContext<'_>) -> String {
    match mode {
        Mode::CMake => cmake::project(ctx),
    }
}

/// Render the top-level descriptor for `mode`.
pub fn root_descriptor(mode: Mode, ctx: &RootContext<'_>) -> String {
    match mode {
        Mode::CMake => cmake::root(ctx),
    }
}

/// Join rendered lines into file text with a trailing newline.
pub(crate) fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::types::{PackageName, PackageRef, Prefix, ProjectName};

    pub fn package(index: usize, prefix: Prefix) -> PackageRef {
        PackageRef::new(ProjectName::indexed(0), prefix, PackageName::indexed(index))
    }
}

//! core::uses
//!
//! Parsing and validation of the uses list.
//!
//! # Format
//!
//! The uses list is comma-separated. Blank entries are ignored. Each
//! entry names either a project or a package by its generated name:
//!
//! - `Proj_NNNN`: every project generated after it uses that project
//! - `Pkg_NNNN`: within each project, every package numbered after it
//!   uses that package
//!
//! Both rules only ever add edges towards lower indices, so the wired
//! graph is acyclic by construction.
//!
//! # Example
//!
//! ```
//! use cmtgen::core::uses::{UseSpec, UsesList};
//!
//! let uses = UsesList::parse("Pkg_0001, ,Proj_0000").unwrap();
//! assert_eq!(uses.len(), 2);
//! assert!(matches!(uses.entries()[0], UseSpec::Package(_)));
//!
//! assert!(UsesList::parse("libfoo").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{PackageName, ProjectName, PACKAGE_STEM, PROJECT_STEM};

/// Errors from uses-list handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsesError {
    #[error("malformed uses entry '{0}', expected Proj_NNNN or Pkg_NNNN")]
    Malformed(String),

    #[error("uses entry '{name}' names a project that is not generated (only {count} projects)")]
    UnknownProject { name: ProjectName, count: usize },

    #[error("uses entry '{name}' names a package that is never generated (at most {max} per project)")]
    UnknownPackage { name: PackageName, max: usize },
}

/// One entry of the uses list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseSpec {
    Project(ProjectName),
    Package(PackageName),
}

impl UseSpec {
    /// Parse a single (already trimmed) entry.
    pub fn parse(entry: &str) -> Result<Self, UsesError> {
        let malformed = || UsesError::Malformed(entry.to_string());

        // Only the generated spelling (`{:04}`) names a real directory.
        if entry.starts_with(PROJECT_STEM) {
            let name = ProjectName::new(entry).map_err(|_| malformed())?;
            return match name.index() {
                Some(i) if ProjectName::indexed(i) == name => Ok(UseSpec::Project(name)),
                _ => Err(malformed()),
            };
        }

        if entry.starts_with(PACKAGE_STEM) {
            let name = PackageName::new(entry).map_err(|_| malformed())?;
            return match name.index() {
                // Packages are numbered from one.
                Some(i) if i > 0 && PackageName::indexed(i) == name => {
                    Ok(UseSpec::Package(name))
                }
                _ => Err(malformed()),
            };
        }

        Err(malformed())
    }
}

impl std::fmt::Display for UseSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UseSpec::Project(name) => write!(f, "{}", name),
            UseSpec::Package(name) => write!(f, "{}", name),
        }
    }
}

/// Ordered, de-duplicated uses list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsesList {
    entries: Vec<UseSpec>,
}

impl UsesList {
    /// An empty list (no dependency edges are wired).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list.
    pub fn parse(list: &str) -> Result<Self, UsesError> {
        Self::from_entries(list.split(','))
    }

    /// Build a list from individual entries.
    ///
    /// Entries are trimmed, blank entries are skipped, and repeats are
    /// dropped keeping the first occurrence.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, UsesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            let spec = UseSpec::parse(entry)?;
            if !list.entries.contains(&spec) {
                list.entries.push(spec);
            }
        }
        Ok(list)
    }

    /// Check every entry refers to something the generator can produce.
    ///
    /// `max_packages` is the per-project package upper bound; a package
    /// beyond it can never exist.
    pub fn validate(&self, projects: usize, max_packages: usize) -> Result<(), UsesError> {
        for project in self.projects() {
            if project.index().map_or(true, |i| i >= projects) {
                return Err(UsesError::UnknownProject {
                    name: project.clone(),
                    count: projects,
                });
            }
        }
        for package in self.packages() {
            if package.index().map_or(true, |i| i > max_packages) {
                return Err(UsesError::UnknownPackage {
                    name: package.clone(),
                    max: max_packages,
                });
            }
        }
        Ok(())
    }

    /// All entries in order.
    pub fn entries(&self) -> &[UseSpec] {
        &self.entries
    }

    /// Project entries in order.
    pub fn projects(&self) -> impl Iterator<Item = &ProjectName> {
        self.entries.iter().filter_map(|e| match e {
            UseSpec::Project(name) => Some(name),
            UseSpec::Package(_) => None,
        })
    }

    /// Package entries in order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageName> {
        self.entries.iter().filter_map(|e| match e {
            UseSpec::Package(name) => Some(name),
            UseSpec::Project(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for UsesList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

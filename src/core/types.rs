//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ProjectName`] - Validated project name (`Proj_NNNN`)
//! - [`PackageName`] - Validated package name (`Pkg_NNNN`)
//! - [`Prefix`] - Namespace prefix a package directory is nested under
//! - [`TreeFingerprint`] - Content hash of a generated tree
//!
//! # Validation
//!
//! Names end up as directory names, CMake target names, and C++ class
//! names, so they are restricted to identifier characters at construction
//! time. Invalid values cannot be represented.
//!
//! # Examples
//!
//! ```
//! use cmtgen::core::types::{PackageName, ProjectName};
//!
//! let proj = ProjectName::indexed(0);
//! assert_eq!(proj.as_str(), "Proj_0000");
//!
//! let pkg = PackageName::indexed(3);
//! assert_eq!(pkg.as_str(), "Pkg_0003");
//! assert_eq!(pkg.index(), Some(3));
//!
//! assert!(PackageName::new("has space").is_err());
//! assert!(ProjectName::new("../escape").is_err());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Leading component of every generated project name.
pub const PROJECT_STEM: &str = "Proj_";

/// Leading component of every generated package name.
pub const PACKAGE_STEM: &str = "Pkg_";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project name: {0}")]
    InvalidProjectName(String),

    #[error("invalid package name: {0}")]
    InvalidPackageName(String),
}

/// Check that a name is usable as both a directory name and a C++ identifier.
fn validate_identifier(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(format!("'{}' cannot start with a digit", name));
    }

    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("'{}' contains invalid character {:?}", name, c));
    }

    Ok(())
}

/// Parse the numeric suffix of `<stem>NNNN`.
fn parse_index(name: &str, stem: &str) -> Option<usize> {
    let digits = name.strip_prefix(stem)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A validated project name.
///
/// Projects generated by the benchmark are numbered from zero:
/// `Proj_0000`, `Proj_0001`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Create a new validated project name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectName` if the name is not a valid identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate_identifier(&name).map_err(TypeError::InvalidProjectName)?;
        Ok(Self(name))
    }

    /// The name of the `index`-th generated project.
    pub fn indexed(index: usize) -> Self {
        Self(format!("{}{:04}", PROJECT_STEM, index))
    }

    /// The index encoded in a `Proj_NNNN` name, if it has that shape.
    pub fn index(&self) -> Option<usize> {
        parse_index(&self.0, PROJECT_STEM)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated package name.
///
/// Packages are numbered from one within their project:
/// `Pkg_0001`, `Pkg_0002`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Create a new validated package name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPackageName` if the name is not a valid identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate_identifier(&name).map_err(TypeError::InvalidPackageName)?;
        Ok(Self(name))
    }

    /// The name of the package numbered `index` (one-based).
    pub fn indexed(index: usize) -> Self {
        Self(format!("{}{:04}", PACKAGE_STEM, index))
    }

    /// The index encoded in a `Pkg_NNNN` name, if it has that shape.
    pub fn index(&self) -> Option<usize> {
        parse_index(&self.0, PACKAGE_STEM)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace prefix under which a package directory lives.
///
/// A package is either placed directly under its project, or nested
/// under the fixed `Pre/Fix` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefix {
    /// No prefix: `Project/Package`.
    #[default]
    None,
    /// Nested prefix: `Project/Pre/Fix/Package`.
    Nested,
}

impl Prefix {
    const NESTED: [&'static str; 2] = ["Pre", "Fix"];

    /// Path components of the prefix.
    pub fn components(&self) -> &'static [&'static str] {
        match self {
            Prefix::None => &[],
            Prefix::Nested => &Self::NESTED,
        }
    }

    /// The prefix as a relative path (empty for [`Prefix::None`]).
    pub fn to_path(&self) -> PathBuf {
        self.components().iter().collect()
    }

    /// The prefix in `/`-separated form, as written into manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::None => "",
            Prefix::Nested => "Pre/Fix",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Prefix::None)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a package: `(project, prefix, name)`.
///
/// This is how one package refers to another it uses. It does not own
/// the referenced package; generated templates only need its name and
/// prefix, which never change after construction.
///
/// # Example
///
/// ```
/// use cmtgen::core::types::{PackageName, PackageRef, Prefix, ProjectName};
/// use std::path::PathBuf;
///
/// let r = PackageRef::new(ProjectName::indexed(0), Prefix::Nested, PackageName::indexed(2));
/// assert_eq!(r.full_name(), "Pre/Fix/Pkg_0002");
/// assert_eq!(r.path(), PathBuf::from("Proj_0000/Pre/Fix/Pkg_0002"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageRef {
    pub project: ProjectName,
    pub prefix: Prefix,
    pub name: PackageName,
}

impl PackageRef {
    pub fn new(project: ProjectName, prefix: Prefix, name: PackageName) -> Self {
        Self {
            project,
            prefix,
            name,
        }
    }

    /// `prefix/name` in `/`-separated form.
    pub fn full_name(&self) -> String {
        if self.prefix.is_none() {
            self.name.to_string()
        } else {
            format!("{}/{}", self.prefix, self.name)
        }
    }

    /// Path of the package directory relative to the output root.
    pub fn path(&self) -> PathBuf {
        Path::new(self.project.as_str())
            .join(self.prefix.to_path())
            .join(self.name.as_str())
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.project, self.full_name())
    }
}

/// Content hash of a generated tree.
///
/// Computed over `(relative path, contents)` pairs sorted by path, so two
/// trees with the same files hash identically regardless of where they
/// are rooted or in which order they were written.
///
/// # Example
///
/// ```
/// use cmtgen::core::types::TreeFingerprint;
/// use std::path::PathBuf;
///
/// let files = vec![
///     (PathBuf::from("Proj_0000/CMakeLists.txt"), b"a".to_vec()),
///     (PathBuf::from("CMakeLists.txt"), b"b".to_vec()),
/// ];
/// let mut reversed = files.clone();
/// reversed.reverse();
///
/// assert_eq!(TreeFingerprint::compute(&files), TreeFingerprint::compute(&reversed));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeFingerprint(String);

impl TreeFingerprint {
    /// Compute a fingerprint from `(relative path, contents)` pairs.
    pub fn compute(files: &[(PathBuf, Vec<u8>)]) -> Self {
        let mut sorted: Vec<_> = files.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut hasher = Sha256::new();
        for (path, contents) in sorted {
            hasher.update(portable_path(path).as_bytes());
            hasher.update(b"\0");
            hasher.update(contents);
            hasher.update(b"\n");
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First twelve hex digits, for display.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for TreeFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a relative path with `/` separators on every platform.
fn portable_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod names {
        use super::*;

        #[test]
        fn indexed_names_are_zero_padded() {
            assert_eq!(ProjectName::indexed(0).as_str(), "Proj_0000");
            assert_eq!(ProjectName::indexed(12).as_str(), "Proj_0012");
            assert_eq!(PackageName::indexed(1).as_str(), "Pkg_0001");
            assert_eq!(PackageName::indexed(10000).as_str(), "Pkg_10000");
        }

        #[test]
        fn index_round_trips() {
            assert_eq!(ProjectName::indexed(7).index(), Some(7));
            assert_eq!(PackageName::indexed(42).index(), Some(42));
        }

        #[test]
        fn index_requires_stem_and_digits() {
            assert_eq!(PackageName::new("Foo_0001").unwrap().index(), None);
            assert_eq!(PackageName::new("Pkg_").unwrap().index(), None);
            assert_eq!(PackageName::new("Pkg_00x1").unwrap().index(), None);
            assert_eq!(ProjectName::new("Pkg_0001").unwrap().index(), None);
        }

        #[test]
        fn identifiers_accepted() {
            assert!(PackageName::new("Pkg_0001").is_ok());
            assert!(PackageName::new("_private").is_ok());
            assert!(ProjectName::new("MyProject").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(PackageName::new("").is_err());
            assert!(ProjectName::new("").is_err());
        }

        #[test]
        fn leading_digit_rejected() {
            assert!(PackageName::new("1pkg").is_err());
        }

        #[test]
        fn path_characters_rejected() {
            assert!(ProjectName::new("a/b").is_err());
            assert!(ProjectName::new("..").is_err());
            assert!(PackageName::new("has space").is_err());
            assert!(PackageName::new("dash-ed").is_err());
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<PackageName, _> = serde_json::from_str("\"a b\"");
            assert!(result.is_err());

            let ok: PackageName = serde_json::from_str("\"Pkg_0002\"").unwrap();
            assert_eq!(ok, PackageName::indexed(2));
        }
    }

    mod prefix {
        use super::*;

        #[test]
        fn none_is_empty() {
            assert_eq!(Prefix::None.as_str(), "");
            assert_eq!(Prefix::None.to_path(), PathBuf::new());
            assert!(Prefix::None.is_none());
        }

        #[test]
        fn nested_path() {
            assert_eq!(Prefix::Nested.as_str(), "Pre/Fix");
            assert_eq!(Prefix::Nested.to_path(), Path::new("Pre").join("Fix"));
        }
    }

    mod fingerprint {
        use super::*;

        #[test]
        fn content_changes_hash() {
            let a = vec![(PathBuf::from("f"), b"one".to_vec())];
            let b = vec![(PathBuf::from("f"), b"two".to_vec())];
            assert_ne!(TreeFingerprint::compute(&a), TreeFingerprint::compute(&b));
        }

        #[test]
        fn path_changes_hash() {
            let a = vec![(PathBuf::from("f"), b"x".to_vec())];
            let b = vec![(PathBuf::from("g"), b"x".to_vec())];
            assert_ne!(TreeFingerprint::compute(&a), TreeFingerprint::compute(&b));
        }

        #[test]
        fn hex_sha256() {
            let fp = TreeFingerprint::compute(&[]);
            assert_eq!(fp.as_str().len(), 64);
            assert_eq!(fp.short().len(), 12);
        }
    }
}

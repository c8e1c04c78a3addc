//! core::paths
//!
//! Centralized path routing for the generated tree.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   CMakeLists.txt                      top-level descriptor ("work")
//!   build/                              build tool output (Run only)
//!   Proj_0000/
//!     CMakeLists.txt                    project descriptor
//!     build/
//!     cmt/
//!     [Pre/Fix/]Pkg_0001/
//!       CMakeLists.txt                  package descriptor
//!       Pkg_0001/LibPkg_0001.h          public header
//!       src/LibPkg_0001.cxx             library source
//!       src/testPkg_0001.cxx            test program
//!       cmt/requirements                manifest
//! ```
//!
//! **Hard rule:** no other module joins file names onto the root. All
//! locations in the tree go through [`TreePaths`], so the layout lives
//! in one place.
//!
//! # Example
//!
//! ```
//! use cmtgen::core::mode::Mode;
//! use cmtgen::core::paths::TreePaths;
//! use cmtgen::core::types::{PackageName, Prefix, ProjectName};
//! use std::path::PathBuf;
//!
//! let paths = TreePaths::new("/out");
//! let proj = ProjectName::indexed(0);
//! let pkg = PackageName::indexed(1);
//!
//! assert_eq!(
//!     paths.header_path(&proj, Prefix::Nested, &pkg),
//!     PathBuf::from("/out/Proj_0000/Pre/Fix/Pkg_0001/Pkg_0001/LibPkg_0001.h")
//! );
//! assert_eq!(
//!     paths.project_descriptor_path(&proj, Mode::CMake),
//!     PathBuf::from("/out/Proj_0000/CMakeLists.txt")
//! );
//! ```

use std::path::{Path, PathBuf};

use super::mode::Mode;
use super::types::{PackageName, Prefix, ProjectName};

/// Name of the build subdirectory at root and project level.
pub const BUILD_DIR: &str = "build";

/// Name of the CMT metadata subdirectory at project and package level.
pub const CMT_DIR: &str = "cmt";

/// Name of the sources subdirectory of a package.
pub const SRC_DIR: &str = "src";

/// Name of the package manifest file inside `cmt/`.
pub const MANIFEST_FILE: &str = "requirements";

/// Path routing for a generated tree rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePaths {
    root: PathBuf,
}

impl TreePaths {
    /// Create path routing for the given output root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Root level
    // =========================================================================

    /// Top-level build descriptor.
    pub fn root_descriptor_path(&self, mode: Mode) -> PathBuf {
        self.root.join(mode.descriptor_file_name())
    }

    /// Directory the external build tool writes into.
    pub fn root_build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    // =========================================================================
    // Project level
    // =========================================================================

    /// `<root>/<project>`.
    pub fn project_dir(&self, project: &ProjectName) -> PathBuf {
        self.root.join(project.as_str())
    }

    /// `<root>/<project>/build`.
    pub fn project_build_dir(&self, project: &ProjectName) -> PathBuf {
        self.project_dir(project).join(BUILD_DIR)
    }

    /// `<root>/<project>/cmt`.
    pub fn project_cmt_dir(&self, project: &ProjectName) -> PathBuf {
        self.project_dir(project).join(CMT_DIR)
    }

    /// `<root>/<project>/CMakeLists.txt` (or the mode's equivalent).
    pub fn project_descriptor_path(&self, project: &ProjectName, mode: Mode) -> PathBuf {
        self.project_dir(project).join(mode.descriptor_file_name())
    }

    // =========================================================================
    // Package level
    // =========================================================================

    /// `<root>/<project>/[<prefix>/]<package>`.
    pub fn package_dir(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.project_dir(project)
            .join(prefix.to_path())
            .join(name.as_str())
    }

    /// Public include directory: `<package dir>/<package>`.
    pub fn package_include_dir(
        &self,
        project: &ProjectName,
        prefix: Prefix,
        name: &PackageName,
    ) -> PathBuf {
        self.package_dir(project, prefix, name).join(name.as_str())
    }

    /// `<package dir>/src`.
    pub fn package_src_dir(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_dir(project, prefix, name).join(SRC_DIR)
    }

    /// `<package dir>/cmt`.
    pub fn package_cmt_dir(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_dir(project, prefix, name).join(CMT_DIR)
    }

    /// `<include dir>/Lib<package>.h`.
    pub fn header_path(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_include_dir(project, prefix, name)
            .join(header_file_name(name))
    }

    /// `<src dir>/Lib<package>.cxx`.
    pub fn source_path(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_src_dir(project, prefix, name)
            .join(format!("Lib{}.cxx", name))
    }

    /// `<src dir>/test<package>.cxx`.
    pub fn test_path(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_src_dir(project, prefix, name)
            .join(format!("test{}.cxx", name))
    }

    /// `<cmt dir>/requirements`.
    pub fn manifest_path(&self, project: &ProjectName, prefix: Prefix, name: &PackageName) -> PathBuf {
        self.package_cmt_dir(project, prefix, name).join(MANIFEST_FILE)
    }

    /// `<package dir>/CMakeLists.txt` (or the mode's equivalent).
    pub fn package_descriptor_path(
        &self,
        project: &ProjectName,
        prefix: Prefix,
        name: &PackageName,
        mode: Mode,
    ) -> PathBuf {
        self.package_dir(project, prefix, name)
            .join(mode.descriptor_file_name())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Strip the root from a path inside the tree, for display.
    ///
    /// Paths outside the root are returned unchanged.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// File name of a package's public header: `Lib<package>.h`.
pub fn header_file_name(name: &PackageName) -> String {
    format!("Lib{}.h", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (TreePaths, ProjectName, PackageName) {
        (
            TreePaths::new("/out"),
            ProjectName::indexed(1),
            PackageName::indexed(3),
        )
    }

    #[test]
    fn root_level_paths() {
        let (paths, _, _) = fixture();
        assert_eq!(
            paths.root_descriptor_path(Mode::CMake),
            PathBuf::from("/out/CMakeLists.txt")
        );
        assert_eq!(paths.root_build_dir(), PathBuf::from("/out/build"));
    }

    #[test]
    fn project_level_paths() {
        let (paths, proj, _) = fixture();
        assert_eq!(paths.project_dir(&proj), PathBuf::from("/out/Proj_0001"));
        assert_eq!(
            paths.project_build_dir(&proj),
            PathBuf::from("/out/Proj_0001/build")
        );
        assert_eq!(
            paths.project_cmt_dir(&proj),
            PathBuf::from("/out/Proj_0001/cmt")
        );
    }

    #[test]
    fn unprefixed_package_paths() {
        let (paths, proj, pkg) = fixture();
        let p = Prefix::None;
        assert_eq!(
            paths.package_dir(&proj, p, &pkg),
            PathBuf::from("/out/Proj_0001/Pkg_0003")
        );
        assert_eq!(
            paths.source_path(&proj, p, &pkg),
            PathBuf::from("/out/Proj_0001/Pkg_0003/src/LibPkg_0003.cxx")
        );
        assert_eq!(
            paths.test_path(&proj, p, &pkg),
            PathBuf::from("/out/Proj_0001/Pkg_0003/src/testPkg_0003.cxx")
        );
        assert_eq!(
            paths.manifest_path(&proj, p, &pkg),
            PathBuf::from("/out/Proj_0001/Pkg_0003/cmt/requirements")
        );
        assert_eq!(
            paths.package_descriptor_path(&proj, p, &pkg, Mode::CMake),
            PathBuf::from("/out/Proj_0001/Pkg_0003/CMakeLists.txt")
        );
    }

    #[test]
    fn prefixed_package_paths() {
        let (paths, proj, pkg) = fixture();
        assert_eq!(
            paths.package_include_dir(&proj, Prefix::Nested, &pkg),
            PathBuf::from("/out/Proj_0001/Pre/Fix/Pkg_0003/Pkg_0003")
        );
    }

    #[test]
    fn relative_strips_root() {
        let (paths, proj, _) = fixture();
        let dir = paths.project_dir(&proj);
        assert_eq!(paths.relative(&dir), Path::new("Proj_0001"));
        assert_eq!(paths.relative(Path::new("/elsewhere")), Path::new("/elsewhere"));
    }
}

//! tree::package
//!
//! The leaf generation unit: one library, its test program, its manifest
//! and its build descriptor.

use std::path::PathBuf;

use super::{GenError, TreeWriter};
use crate::core::types::{PackageName, PackageRef, Prefix, ProjectName};
use crate::templates::{self, Artifact, PackageContext};

/// A generated package.
///
/// Identified by `(project, prefix, name)`. The Uses list holds the
/// identities of the packages this one depends on, in the order they
/// appear in every generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: PackageRef,
    uses: Vec<PackageRef>,
}

impl Package {
    /// Create a package with an empty Uses list.
    pub fn new(project: ProjectName, prefix: Prefix, name: PackageName) -> Self {
        Self {
            id: PackageRef::new(project, prefix, name),
            uses: Vec::new(),
        }
    }

    /// Identity of this package, as other packages refer to it.
    pub fn id(&self) -> &PackageRef {
        &self.id
    }

    pub fn name(&self) -> &PackageName {
        &self.id.name
    }

    pub fn prefix(&self) -> Prefix {
        self.id.prefix
    }

    pub fn project(&self) -> &ProjectName {
        &self.id.project
    }

    /// `prefix/name`.
    pub fn full_name(&self) -> String {
        self.id.full_name()
    }

    /// Package directory relative to the output root.
    pub fn path(&self) -> PathBuf {
        self.id.path()
    }

    /// Packages this one uses, in order.
    pub fn uses(&self) -> &[PackageRef] {
        &self.uses
    }

    /// Append a used package.
    ///
    /// Returns `false` (and changes nothing) if `dep` is already used, so
    /// every used package appears exactly once in the artifacts.
    pub fn add_use(&mut self, dep: PackageRef) -> bool {
        if self.uses.contains(&dep) {
            return false;
        }
        self.uses.push(dep);
        true
    }

    /// Template context for this package.
    pub fn context(&self) -> PackageContext<'_> {
        PackageContext::new(&self.id, &self.uses)
    }

    /// Remove the package directory.
    pub fn cleanup(&self, w: &TreeWriter) -> Result<(), GenError> {
        w.remove_dir(&self.dir(w))
    }

    /// Create the package directory and its `<name>/`, `src/`, `cmt/`
    /// subdirectories.
    pub fn gen_structure(&self, w: &TreeWriter) -> Result<(), GenError> {
        let paths = w.paths();
        let (project, prefix, name) = (self.project(), self.prefix(), self.name());
        for dir in [
            paths.package_dir(project, prefix, name),
            paths.package_include_dir(project, prefix, name),
            paths.package_src_dir(project, prefix, name),
            paths.package_cmt_dir(project, prefix, name),
        ] {
            w.mkdir(&dir)?;
        }
        Ok(())
    }

    /// Write the public header.
    pub fn gen_header(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.emit(w, Artifact::Header)
    }

    /// Write the library source.
    pub fn gen_source(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.emit(w, Artifact::Source)
    }

    /// Write the test program.
    pub fn gen_test(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.emit(w, Artifact::Test)
    }

    /// Write the `cmt/requirements` manifest.
    pub fn gen_manifest(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.emit(w, Artifact::Manifest)
    }

    /// Write all four per-package artifacts.
    pub fn generate(&self, w: &TreeWriter) -> Result<(), GenError> {
        w.output().debug(format_args!("> gen [{}]", self.full_name()));
        self.gen_header(w)?;
        self.gen_source(w)?;
        self.gen_test(w)?;
        self.gen_manifest(w)
    }

    /// Write the package-level build descriptor.
    pub fn gen_config_file(&self, w: &TreeWriter) -> Result<(), GenError> {
        let path = w.paths().package_descriptor_path(
            self.project(),
            self.prefix(),
            self.name(),
            w.mode(),
        );
        w.write(&path, &templates::package_descriptor(w.mode(), &self.context()))
    }

    fn emit(&self, w: &TreeWriter, artifact: Artifact) -> Result<(), GenError> {
        let paths = w.paths();
        let (project, prefix, name) = (self.project(), self.prefix(), self.name());
        let path = match artifact {
            Artifact::Header => paths.header_path(project, prefix, name),
            Artifact::Source => paths.source_path(project, prefix, name),
            Artifact::Test => paths.test_path(project, prefix, name),
            Artifact::Manifest => paths.manifest_path(project, prefix, name),
        };
        w.write(&path, &templates::render_artifact(artifact, &self.context()))
    }

    fn dir(&self, w: &TreeWriter) -> PathBuf {
        w.paths()
            .package_dir(self.project(), self.prefix(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::Mode;
    use crate::core::paths::TreePaths;
    use crate::ui::output::Output;
    use std::fs;
    use tempfile::TempDir;

    fn pkg(i: usize, prefix: Prefix) -> Package {
        Package::new(ProjectName::indexed(0), prefix, PackageName::indexed(i))
    }

    fn writer(temp: &TempDir) -> TreeWriter {
        TreeWriter::new(TreePaths::new(temp.path()), Mode::CMake, Output::quiet())
    }

    #[test]
    fn derived_names() {
        let p = pkg(2, Prefix::Nested);
        assert_eq!(p.full_name(), "Pre/Fix/Pkg_0002");
        assert_eq!(p.path(), PathBuf::from("Proj_0000/Pre/Fix/Pkg_0002"));
    }

    #[test]
    fn add_use_ignores_duplicates() {
        let mut p = pkg(3, Prefix::None);
        let dep = pkg(1, Prefix::None).id().clone();

        assert!(p.add_use(dep.clone()));
        assert!(!p.add_use(dep.clone()));
        assert_eq!(p.uses(), &[dep]);
    }

    #[test]
    fn generate_writes_all_artifacts() {
        let temp = TempDir::new().unwrap();
        let w = writer(&temp);
        let mut p = pkg(2, Prefix::Nested);
        p.add_use(pkg(1, Prefix::None).id().clone());

        p.gen_structure(&w).unwrap();
        p.generate(&w).unwrap();
        p.gen_config_file(&w).unwrap();

        let dir = temp.path().join("Proj_0000/Pre/Fix/Pkg_0002");
        for file in [
            "Pkg_0002/LibPkg_0002.h",
            "src/LibPkg_0002.cxx",
            "src/testPkg_0002.cxx",
            "cmt/requirements",
            "CMakeLists.txt",
        ] {
            assert!(dir.join(file).is_file(), "missing {file}");
        }

        let header = fs::read_to_string(dir.join("Pkg_0002/LibPkg_0002.h")).unwrap();
        assert!(header.contains("#include \"Pkg_0001/LibPkg_0001.h\""));
        assert!(header.contains("CPkg_0001 m_Pkg_0001;"));
    }

    #[test]
    fn generate_without_structure_fails() {
        let temp = TempDir::new().unwrap();
        let err = pkg(1, Prefix::None).generate(&writer(&temp)).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }

    #[test]
    fn cleanup_removes_directory() {
        let temp = TempDir::new().unwrap();
        let w = writer(&temp);
        let p = pkg(1, Prefix::None);

        p.gen_structure(&w).unwrap();
        assert!(temp.path().join("Proj_0000/Pkg_0001/src").is_dir());

        p.cleanup(&w).unwrap();
        assert!(!temp.path().join("Proj_0000/Pkg_0001").exists());
        p.cleanup(&w).unwrap();
    }
}

//! tree::project
//!
//! A project: an ordered set of packages sharing a root directory.

use rand::Rng;

use super::{GenError, Package, TreeWriter};
use crate::core::types::{PackageName, PackageRef, Prefix, ProjectName};
use crate::templates::{self, ProjectContext};

/// A generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: ProjectName,
    packages: Vec<Package>,
    uses: Vec<ProjectName>,
}

impl Project {
    /// Create a project holding `npkgs` packages `Pkg_0001..=Pkg_<npkgs>`.
    ///
    /// Each package independently gets no prefix or the nested `Pre/Fix`
    /// prefix with equal probability.
    pub fn new<R: Rng + ?Sized>(name: ProjectName, npkgs: usize, rng: &mut R) -> Self {
        let packages = (1..=npkgs)
            .map(|i| {
                let prefix = if rng.random_bool(0.5) {
                    Prefix::Nested
                } else {
                    Prefix::None
                };
                Package::new(name.clone(), prefix, PackageName::indexed(i))
            })
            .collect();

        Self {
            name,
            packages,
            uses: Vec::new(),
        }
    }

    /// Create a project from explicitly constructed packages.
    pub fn with_packages(name: ProjectName, packages: Vec<Package>) -> Self {
        Self {
            name,
            packages,
            uses: Vec::new(),
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Look up a package by name.
    pub fn package(&self, name: &PackageName) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Projects this one uses, in order.
    pub fn uses(&self) -> &[ProjectName] {
        &self.uses
    }

    /// Declare a project-level use. Returns `false` if already declared.
    pub fn add_use(&mut self, project: ProjectName) -> bool {
        if self.uses.contains(&project) {
            return false;
        }
        self.uses.push(project);
        true
    }

    /// Make every package after `used` in this project use it.
    ///
    /// Does nothing if the project has no package named `used`. Returns
    /// the number of edges added.
    pub fn wire_package_use(&mut self, used: &PackageName) -> usize {
        let Some(pos) = self.packages.iter().position(|p| p.name() == used) else {
            return 0;
        };
        let dep = self.packages[pos].id().clone();

        self.packages[pos + 1..]
            .iter_mut()
            .map(|p| p.add_use(dep.clone()))
            .filter(|added| *added)
            .count()
    }

    /// Remove the project directory.
    pub fn cleanup(&self, w: &TreeWriter) -> Result<(), GenError> {
        w.remove_dir(&w.paths().project_dir(&self.name))
    }

    /// Create the project directory with `build/` and `cmt/`, then every
    /// package's directories.
    pub fn gen_structure(&self, w: &TreeWriter) -> Result<(), GenError> {
        let paths = w.paths();
        for dir in [
            paths.project_dir(&self.name),
            paths.project_build_dir(&self.name),
            paths.project_cmt_dir(&self.name),
        ] {
            w.mkdir(&dir)?;
        }

        for pkg in &self.packages {
            pkg.gen_structure(w)?;
        }
        Ok(())
    }

    /// Write every package's artifacts, in package order.
    pub fn generate(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.gen_packages(w)
    }

    fn gen_packages(&self, w: &TreeWriter) -> Result<(), GenError> {
        for pkg in &self.packages {
            pkg.generate(w)?;
        }
        Ok(())
    }

    /// Write the project descriptor, then every package descriptor.
    pub fn gen_config_file(&self, w: &TreeWriter) -> Result<(), GenError> {
        let refs: Vec<PackageRef> = self.packages.iter().map(|p| p.id().clone()).collect();
        let ctx = ProjectContext {
            name: &self.name,
            uses: &self.uses,
            packages: &refs,
        };
        let path = w.paths().project_descriptor_path(&self.name, w.mode());
        w.write(&path, &templates::project_descriptor(w.mode(), &ctx))?;

        for pkg in &self.packages {
            pkg.gen_config_file(w)?;
        }
        Ok(())
    }
}

//! tree::generator
//!
//! Top-level orchestration: builds the project/package hierarchy, writes
//! it in four phases, and drives the external build over it.
//!
//! # Example
//!
//! ```no_run
//! use cmtgen::core::mode::Mode;
//! use cmtgen::core::uses::UsesList;
//! use cmtgen::runner::SystemRunner;
//! use cmtgen::tree::Generator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let uses = UsesList::parse("Pkg_0001").unwrap();
//! let gen = Generator::new(Mode::CMake, "/tmp/out", 2, 3, uses, &mut rng).unwrap();
//!
//! gen.generate().unwrap();
//!
//! let env = gen.build_env(None).unwrap();
//! let report = gen.run(&SystemRunner::new(), &env).unwrap();
//! println!("built in {:?}", report.total());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;

use super::summary::{PackageSummary, ProjectSummary, TreeSummary};
use super::{FsOp, GenError, Project, TreeWriter};
use crate::core::graph::UsesGraph;
use crate::core::mode::Mode;
use crate::core::paths::TreePaths;
use crate::core::types::{ProjectName, TreeFingerprint};
use crate::core::uses::UsesList;
use crate::runner::{self, BuildEnv, BuildRunner, RunReport, StepTiming};
use crate::templates::{self, RootContext};
use crate::ui::output::Output;

/// Builds a hierarchy of projects, each holding a hierarchy of packages,
/// each of which contains:
///
/// - the sources of a C++ library with one class
/// - the sources of a test program instantiating that class
/// - a CMT `requirements` manifest
/// - a build descriptor
///
/// Projects may use other projects and packages may use other packages.
/// A package's class includes every used package's header and holds one
/// instance of each used class.
#[derive(Debug, Clone)]
pub struct Generator {
    mode: Mode,
    paths: TreePaths,
    projects: Vec<Project>,
    uses: UsesList,
    output: Output,
}

impl Generator {
    /// Build a randomized tree of `nprojects` projects.
    ///
    /// Each project gets between 1 and `npkgs` packages (inclusive),
    /// drawn from `rng`, and each package a random prefix. The uses list
    /// is then wired into dependency edges (see [`crate::core::uses`]).
    ///
    /// Nothing is written to disk.
    ///
    /// # Errors
    ///
    /// - `GenError::NoPackages` if `npkgs` is zero
    /// - `GenError::InvalidOutputDir` if `dir` is empty or not a directory
    /// - `GenError::Uses` if the uses list names something never generated
    pub fn new<R: Rng + ?Sized>(
        mode: Mode,
        dir: impl AsRef<Path>,
        nprojects: usize,
        npkgs: usize,
        uses: UsesList,
        rng: &mut R,
    ) -> Result<Self, GenError> {
        if npkgs == 0 {
            return Err(GenError::NoPackages);
        }
        uses.validate(nprojects, npkgs)?;

        let mut projects: Vec<Project> = (0..nprojects)
            .map(|i| {
                let count = rng.random_range(1..=npkgs);
                Project::new(ProjectName::indexed(i), count, rng)
            })
            .collect();

        for used in uses.projects() {
            let Some(index) = used.index() else { continue };
            for project in projects.iter_mut().skip(index + 1) {
                project.add_use(used.clone());
            }
        }
        for used in uses.packages() {
            for project in &mut projects {
                project.wire_package_use(used);
            }
        }

        let mut gen = Self::with_projects(mode, dir, projects)?;
        gen.uses = uses;
        Ok(gen)
    }

    /// Build a generator over explicitly constructed projects.
    ///
    /// # Errors
    ///
    /// - `GenError::InvalidOutputDir` if `dir` is empty or not a directory
    /// - `GenError::DuplicateProject` if two projects share a name
    /// - `GenError::DuplicatePackage` if a project holds the same package twice
    /// - `GenError::DanglingUse` if a package uses one outside the tree
    /// - `GenError::Cycle` if the package uses graph is cyclic
    pub fn with_projects(
        mode: Mode,
        dir: impl AsRef<Path>,
        projects: Vec<Project>,
    ) -> Result<Self, GenError> {
        let root = resolve_root(dir.as_ref())?;

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for project in &projects {
            if !names.insert(project.name()) {
                return Err(GenError::DuplicateProject(project.name().to_string()));
            }
            for pkg in project.packages() {
                if !ids.insert(pkg.id()) {
                    return Err(GenError::DuplicatePackage(pkg.id().clone()));
                }
            }
        }

        check_uses(&projects)?;

        Ok(Self {
            mode,
            paths: TreePaths::new(root),
            projects,
            uses: UsesList::new(),
            output: Output::default(),
        })
    }

    /// Replace the output sink.
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Absolute output root.
    pub fn dir(&self) -> &Path {
        self.paths.root()
    }

    pub fn paths(&self) -> &TreePaths {
        &self.paths
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The uses list the tree was wired from.
    pub fn uses(&self) -> &UsesList {
        &self.uses
    }

    /// Total number of packages over all projects.
    pub fn package_count(&self) -> usize {
        self.projects.iter().map(|p| p.packages().len()).sum()
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Write the whole tree: cleanup, structure, generate, config.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error. Nothing is rolled back; the
    /// next call's cleanup discards a partial tree.
    pub fn generate(&self) -> Result<(), GenError> {
        let w = self.writer();
        self.cleanup_projects(&w)?;
        self.gen_structure(&w)?;
        self.gen_packages(&w)?;
        self.gen_config_files(&w)
    }

    fn writer(&self) -> TreeWriter {
        TreeWriter::new(self.paths.clone(), self.mode, self.output)
    }

    fn cleanup_projects(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.output.debug("> cleanup...");
        for project in &self.projects {
            project.cleanup(w)?;
        }
        for stale in self.stale_projects()? {
            w.remove_dir(&stale)?;
        }
        Ok(())
    }

    /// Project directories left under the root by an earlier, larger run.
    fn stale_projects(&self) -> Result<Vec<PathBuf>, GenError> {
        let root = self.paths.root();
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        let read_err = |source| GenError::Io {
            op: FsOp::Read,
            path: root.to_path_buf(),
            source,
        };

        let mut stale = Vec::new();
        for entry in fs::read_dir(root).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            let generated = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| ProjectName::new(n).ok())
                .filter(|name| name.index().map(ProjectName::indexed).as_ref() == Some(name));
            if let Some(name) = generated {
                if path.is_dir() && !self.projects.iter().any(|p| p.name() == &name) {
                    stale.push(path);
                }
            }
        }
        stale.sort();
        Ok(stale)
    }

    fn gen_structure(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.output.debug("> gen_structure...");
        w.mkdir(self.paths.root())?;

        for project in &self.projects {
            project.gen_structure(w)?;
        }

        w.remove_dir(&self.paths.root_build_dir())?;

        let names: Vec<ProjectName> = self.projects.iter().map(|p| p.name().clone()).collect();
        let ctx = RootContext {
            root: self.paths.root(),
            projects: &names,
        };
        w.write(
            &self.paths.root_descriptor_path(self.mode),
            &templates::root_descriptor(self.mode, &ctx),
        )
    }

    fn gen_packages(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.output.debug("> generate...");
        for project in &self.projects {
            project.generate(w)?;
        }
        Ok(())
    }

    fn gen_config_files(&self, w: &TreeWriter) -> Result<(), GenError> {
        self.output.debug("> gen_config_files...");
        for project in &self.projects {
            project.gen_config_file(w)?;
        }
        Ok(())
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build environment for this tree, with `cmt_root` falling back to
    /// the `CMTROOT` environment variable.
    pub fn build_env(&self, cmt_root: Option<PathBuf>) -> Result<BuildEnv, GenError> {
        Ok(BuildEnv::resolve(cmt_root, self.paths.root())?)
    }

    /// Drive the external build tool over the generated tree.
    ///
    /// Recreates `<root>/build`, then runs the mode's steps in order,
    /// timing each one.
    ///
    /// # Errors
    ///
    /// - `GenError::NotGenerated` if the top-level descriptor is missing
    /// - `GenError::Io` if the build directory cannot be recreated
    /// - `GenError::Runner` for the first step that fails
    pub fn run(&self, runner: &dyn BuildRunner, env: &BuildEnv) -> Result<RunReport, GenError> {
        let descriptor = self.paths.root_descriptor_path(self.mode);
        if !descriptor.is_file() {
            return Err(GenError::NotGenerated(self.paths.root().to_path_buf()));
        }

        let w = self.writer();
        let build_dir = self.paths.root_build_dir();
        w.remove_dir(&build_dir)?;
        w.mkdir(&build_dir)?;

        let mut report = RunReport::default();
        for step in runner::build_steps(self.mode, &self.paths) {
            let command = step.command_line();
            self.output.debug(format_args!("> run [{}]", command));

            let start = Instant::now();
            runner.run_step(&step, env, self.output.forwards_tool_output())?;

            report.steps.push(StepTiming {
                name: step.name.to_string(),
                command,
                elapsed: start.elapsed(),
            });
        }
        Ok(report)
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Fingerprint of the tree currently on disk.
    ///
    /// Covers the top-level descriptor and every file under this
    /// generator's project directories; the build directory is excluded.
    pub fn fingerprint(&self) -> Result<TreeFingerprint, GenError> {
        let mut files = Vec::new();

        let descriptor = self.paths.root_descriptor_path(self.mode);
        files.push((
            self.relative(&descriptor),
            read_file(&descriptor)?,
        ));

        for project in &self.projects {
            collect_files(&self.paths.project_dir(project.name()), &mut |path| {
                files.push((self.relative(path), read_file(path)?));
                Ok(())
            })?;
        }

        Ok(TreeFingerprint::compute(&files))
    }

    /// Serializable description of the in-memory tree.
    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            mode: self.mode,
            root: self.paths.root().to_path_buf(),
            uses: self.uses.entries().iter().map(ToString::to_string).collect(),
            projects: self
                .projects
                .iter()
                .map(|project| ProjectSummary {
                    name: project.name().clone(),
                    uses: project.uses().to_vec(),
                    packages: project
                        .packages()
                        .iter()
                        .map(|pkg| PackageSummary {
                            name: pkg.name().clone(),
                            full_name: pkg.full_name(),
                            uses: pkg.uses().iter().map(|u| u.full_name()).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        self.paths.relative(path).to_path_buf()
    }
}

/// Make the output root absolute without touching the filesystem beyond
/// a metadata check.
fn resolve_root(dir: &Path) -> Result<PathBuf, GenError> {
    let invalid = |reason: String| GenError::InvalidOutputDir {
        path: dir.to_path_buf(),
        reason,
    };

    if dir.as_os_str().is_empty() {
        return Err(invalid("path is empty".into()));
    }

    let root = std::path::absolute(dir).map_err(|e| invalid(e.to_string()))?;
    if root.exists() && !root.is_dir() {
        return Err(invalid("exists and is not a directory".into()));
    }
    Ok(root)
}

/// Every used package must be in the tree, and the uses graph acyclic.
fn check_uses(projects: &[Project]) -> Result<(), GenError> {
    let mut graph = UsesGraph::new();
    let known: HashSet<_> = projects
        .iter()
        .flat_map(|p| p.packages())
        .map(|pkg| pkg.id())
        .collect();

    for pkg in projects.iter().flat_map(|p| p.packages()) {
        graph.add_node(pkg.id().clone());
        for used in pkg.uses() {
            if !known.contains(used) {
                return Err(GenError::DanglingUse {
                    package: pkg.id().clone(),
                    used: used.clone(),
                });
            }
            graph.add_edge(pkg.id().clone(), used.clone());
        }
    }

    match graph.find_cycle() {
        Some(cycle) => Err(GenError::Cycle(cycle)),
        None => Ok(()),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, GenError> {
    fs::read(path).map_err(|source| GenError::Io {
        op: FsOp::Read,
        path: path.to_path_buf(),
        source,
    })
}

/// Visit every regular file under `dir`, depth first.
fn collect_files(
    dir: &Path,
    visit: &mut dyn FnMut(&Path) -> Result<(), GenError>,
) -> Result<(), GenError> {
    let read_err = |source| GenError::Io {
        op: FsOp::Read,
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, visit)?;
        } else {
            visit(&path)?;
        }
    }
    Ok(())
}

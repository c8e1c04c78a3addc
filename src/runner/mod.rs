//! runner
//!
//! Boundary to the external build tool.
//!
//! # Design
//!
//! A [`Mode`] maps to an ordered list of [`BuildStep`]s (for CMake:
//! configure, then build). A [`BuildRunner`] executes one step at a time;
//! the generator stops at the first step that fails to spawn or exits
//! non-zero. There is no retry and no timeout: a hung build tool hangs
//! the run.
//!
//! The tool's own diagnostics are never interpreted. Its combined output
//! is forwarded to ours in debug mode and discarded otherwise.
//!
//! # Modules
//!
//! - [`system`] - Runs steps as child processes
//! - [`mock`] - Records steps in memory, for tests

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::core::mode::Mode;
use crate::core::paths::TreePaths;

/// Environment variable naming the CMT support macros directory.
pub const CMTROOT_VAR: &str = "CMTROOT";

/// Environment variable naming the project search path.
pub const CMTPROJECTPATH_VAR: &str = "CMTPROJECTPATH";

/// Errors from invoking the build tool.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("CMTROOT is not set; pass --cmt-root or set cmt_root in the config file")]
    MissingCmtRoot,

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' ({step}) failed with {}", describe_exit(.code))]
    Failed {
        step: String,
        program: String,
        code: Option<i32>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Environment values the build tool reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    /// Location of the CMT CMake macros.
    pub cmt_root: PathBuf,
    /// Root search path for generated projects.
    pub project_path: PathBuf,
}

impl BuildEnv {
    pub fn new(cmt_root: impl Into<PathBuf>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            cmt_root: cmt_root.into(),
            project_path: project_path.into(),
        }
    }

    /// Resolve `cmt_root` from an explicit value, falling back to the
    /// `CMTROOT` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::MissingCmtRoot` if neither is set.
    pub fn resolve(
        cmt_root: Option<PathBuf>,
        project_path: impl Into<PathBuf>,
    ) -> Result<Self, RunnerError> {
        let cmt_root = cmt_root
            .or_else(|| std::env::var_os(CMTROOT_VAR).map(PathBuf::from))
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(RunnerError::MissingCmtRoot)?;
        Ok(Self::new(cmt_root, project_path))
    }

    /// `(name, value)` pairs to set on each child process.
    pub fn vars(&self) -> [(&'static str, &Path); 2] {
        [
            (CMTROOT_VAR, self.cmt_root.as_path()),
            (CMTPROJECTPATH_VAR, self.project_path.as_path()),
        ]
    }
}

/// One external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    /// Short step name ("configure", "build").
    pub name: &'static str,
    pub program: String,
    pub args: Vec<OsString>,
    /// Working directory.
    pub cwd: PathBuf,
}

impl BuildStep {
    /// The command line, for display.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// The ordered build recipe for `mode` over the tree at `paths`.
pub fn build_steps(mode: Mode, paths: &TreePaths) -> Vec<BuildStep> {
    let build_dir = paths.root_build_dir();
    match mode {
        Mode::CMake => vec![
            BuildStep {
                name: "configure",
                program: "cmake".into(),
                args: vec![paths.root().as_os_str().to_os_string()],
                cwd: build_dir.clone(),
            },
            BuildStep {
                name: "build",
                program: "cmake".into(),
                args: vec!["--build".into(), ".".into()],
                cwd: build_dir,
            },
        ],
    }
}

/// Executes build steps.
pub trait BuildRunner {
    /// Run one step to completion.
    ///
    /// `forward_output` decides whether the child's stdout/stderr reach
    /// our own; otherwise they are discarded.
    ///
    /// # Errors
    ///
    /// `RunnerError::Spawn` if the program cannot be started,
    /// `RunnerError::Failed` if it exits with a non-zero status.
    fn run_step(
        &self,
        step: &BuildStep,
        env: &BuildEnv,
        forward_output: bool,
    ) -> Result<(), RunnerError>;
}

/// Wall-clock time of one completed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub command: String,
    pub elapsed: Duration,
}

/// Measurements of a completed build run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepTiming>,
}

impl RunReport {
    /// Total time over all steps.
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmake_recipe_configures_then_builds_in_build_dir() {
        let paths = TreePaths::new("/out");
        let steps = build_steps(Mode::CMake, &paths);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "configure");
        assert_eq!(steps[0].command_line(), "cmake /out");
        assert_eq!(steps[1].name, "build");
        assert_eq!(steps[1].command_line(), "cmake --build .");
        assert!(steps.iter().all(|s| s.cwd == PathBuf::from("/out/build")));
    }

    #[test]
    fn env_vars_names() {
        let env = BuildEnv::new("/opt/cmt", "/out");
        let vars = env.vars();
        assert_eq!(vars[0], ("CMTROOT", Path::new("/opt/cmt")));
        assert_eq!(vars[1], ("CMTPROJECTPATH", Path::new("/out")));
    }

    #[test]
    fn resolve_prefers_explicit_value() {
        let env = BuildEnv::resolve(Some(PathBuf::from("/explicit")), "/out").unwrap();
        assert_eq!(env.cmt_root, PathBuf::from("/explicit"));
    }

    #[test]
    fn resolve_rejects_empty_value() {
        // An explicit empty value does not fall through to the environment.
        let result = BuildEnv::resolve(Some(PathBuf::new()), "/out");
        assert!(matches!(result, Err(RunnerError::MissingCmtRoot)));
    }

    #[test]
    fn failed_message_includes_status() {
        let err = RunnerError::Failed {
            step: "build".into(),
            program: "cmake".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "'cmake' (build) failed with exit status 2");
    }

    #[test]
    fn report_total_sums_steps() {
        let report = RunReport {
            steps: vec![
                StepTiming {
                    name: "configure".into(),
                    command: "cmake /out".into(),
                    elapsed: Duration::from_millis(30),
                },
                StepTiming {
                    name: "build".into(),
                    command: "cmake --build .".into(),
                    elapsed: Duration::from_millis(70),
                },
            ],
        };
        assert_eq!(report.total(), Duration::from_millis(100));
    }
}

//! runner::mock
//!
//! Mock build runner for deterministic testing.
//!
//! # Design
//!
//! The mock never spawns anything. It records each step it is asked to
//! run along with the environment and output forwarding it was given,
//! and can be told to fail a named step.
//!
//! # Example
//!
//! ```
//! use cmtgen::runner::{BuildEnv, BuildRunner, BuildStep, MockRunner};
//! use std::path::PathBuf;
//!
//! let runner = MockRunner::new();
//! let step = BuildStep {
//!     name: "configure",
//!     program: "cmake".into(),
//!     args: vec![],
//!     cwd: PathBuf::from("/out/build"),
//! };
//!
//! runner.run_step(&step, &BuildEnv::new("/cmt", "/out"), false).unwrap();
//! assert_eq!(runner.operations().len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use super::{BuildEnv, BuildRunner, BuildStep, RunnerError};

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    /// Step name to fail, with the exit code to report.
    fail_on: Option<(String, i32)>,
    operations: Vec<MockOperation>,
}

/// Recorded step invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOperation {
    pub step: BuildStep,
    pub env: BuildEnv,
    pub forward_output: bool,
    /// Whether the step's working directory existed when it ran.
    pub cwd_existed: bool,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the step named `step` fail with exit status `code`.
    pub fn fail_on(&self, step: &str, code: i32) {
        self.lock().fail_on = Some((step.to_string(), code));
    }

    /// All recorded invocations, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Names of the steps run, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.lock().operations.iter().map(|op| op.step.name).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRunnerInner> {
        // A panic while holding the lock only happens inside a failing test.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BuildRunner for MockRunner {
    fn run_step(
        &self,
        step: &BuildStep,
        env: &BuildEnv,
        forward_output: bool,
    ) -> Result<(), RunnerError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation {
            step: step.clone(),
            env: env.clone(),
            forward_output,
            cwd_existed: step.cwd.is_dir(),
        });

        match &inner.fail_on {
            Some((name, code)) if name == step.name => Err(RunnerError::Failed {
                step: step.name.to_string(),
                program: step.program.clone(),
                code: Some(*code),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn step(name: &'static str) -> BuildStep {
        BuildStep {
            name,
            program: "cmake".into(),
            args: vec![],
            cwd: PathBuf::from("/nonexistent"),
        }
    }

    #[test]
    fn records_steps_in_order() {
        let runner = MockRunner::new();
        let env = BuildEnv::new("/cmt", "/out");

        runner.run_step(&step("configure"), &env, true).unwrap();
        runner.run_step(&step("build"), &env, false).unwrap();

        assert_eq!(runner.step_names(), ["configure", "build"]);
        let ops = runner.operations();
        assert!(ops[0].forward_output);
        assert!(!ops[1].forward_output);
        assert!(!ops[0].cwd_existed);
    }

    #[test]
    fn fails_named_step() {
        let runner = MockRunner::new();
        runner.fail_on("build", 2);
        let env = BuildEnv::new("/cmt", "/out");

        runner.run_step(&step("configure"), &env, false).unwrap();
        let err = runner.run_step(&step("build"), &env, false).unwrap_err();
        assert!(matches!(err, RunnerError::Failed { code: Some(2), .. }));
    }

    #[test]
    fn clones_share_state() {
        let runner = MockRunner::new();
        let clone = runner.clone();
        clone
            .run_step(&step("configure"), &BuildEnv::new("/cmt", "/out"), false)
            .unwrap();
        assert_eq!(runner.operations().len(), 1);
    }
}

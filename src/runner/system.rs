//! runner::system
//!
//! Runs build steps as blocking child processes.

use std::process::{Command, Stdio};

use super::{BuildEnv, BuildRunner, BuildStep, RunnerError};

/// Runs each step with [`std::process::Command`].
///
/// The build environment is set on the child only; our own process
/// environment is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl BuildRunner for SystemRunner {
    fn run_step(
        &self,
        step: &BuildStep,
        env: &BuildEnv,
        forward_output: bool,
    ) -> Result<(), RunnerError> {
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args)
            .current_dir(&step.cwd)
            .envs(env.vars())
            .stdin(Stdio::null());

        if forward_output {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().map_err(|source| RunnerError::Spawn {
            program: step.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(RunnerError::Failed {
                step: step.name.to_string(),
                program: step.program.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn step(program: &str, args: &[&str], temp: &TempDir) -> BuildStep {
        BuildStep {
            name: "test",
            program: program.to_string(),
            args: args.iter().map(|a| std::ffi::OsString::from(*a)).collect(),
            cwd: temp.path().to_path_buf(),
        }
    }

    #[test]
    fn success_status() {
        let temp = TempDir::new().unwrap();
        let env = BuildEnv::new("/opt/cmt", temp.path());
        SystemRunner::new()
            .run_step(&step("true", &[], &temp), &env, false)
            .unwrap();
    }

    #[test]
    fn nonzero_status_is_failure() {
        let temp = TempDir::new().unwrap();
        let env = BuildEnv::new("/opt/cmt", temp.path());
        let err = SystemRunner::new()
            .run_step(&step("sh", &["-c", "exit 3"], &temp), &env, false)
            .unwrap_err();

        assert!(matches!(err, RunnerError::Failed { code: Some(3), .. }));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let env = BuildEnv::new("/opt/cmt", temp.path());
        let err = SystemRunner::new()
            .run_step(&step("cmtgen-no-such-program", &[], &temp), &env, false)
            .unwrap_err();

        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[test]
    fn child_sees_build_env_and_cwd() {
        let temp = TempDir::new().unwrap();
        let env = BuildEnv::new("/opt/cmt", "/projects");
        let script = "test \"$CMTROOT\" = /opt/cmt && test \"$CMTPROJECTPATH\" = /projects && touch marker";

        SystemRunner::new()
            .run_step(&step("sh", &["-c", script], &temp), &env, false)
            .unwrap();
        assert!(temp.path().join("marker").exists());
    }
}

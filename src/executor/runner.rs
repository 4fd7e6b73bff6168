//! External process invocation.
//!
//! Every `configure`, `make`, `git`, `pytest` and installer call goes through
//! the [`Runner`] trait so orchestration can be exercised without a toolchain.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::output;

use super::context::Context;
use super::error::ExecuteError;
use super::util::shell_quote;

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Step {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Starts external processes on behalf of the orchestrator.
pub trait Runner {
    /// Run a step with inherited stdio and return its exit code
    /// (`None` when terminated by a signal).
    fn status(&self, step: &Step) -> Result<Option<i32>, ExecuteError>;

    /// Run a step with captured output and return its stdout.
    fn output(&self, step: &Step) -> Result<String, ExecuteError>;

    /// Find an executable, looking in `preferred` before `PATH`.
    fn locate(&self, tool: &str, preferred: &Path) -> Option<PathBuf> {
        let candidate = preferred.join(tool);
        if candidate.is_file() {
            return Some(candidate);
        }
        which::which(tool).ok()
    }

    /// Run a step and fail unless it exits with status 0.
    fn check(&self, step: &Step) -> Result<(), ExecuteError> {
        match self.status(step)? {
            Some(0) => Ok(()),
            code => Err(ExecuteError::CommandFailed {
                cmd: step.to_string(),
                code,
            }),
        }
    }
}

/// Runs steps as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    dry_run: bool,
    verbose: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self {
            dry_run: ctx.dry_run,
            verbose: ctx.verbose,
        }
    }

    fn announce(&self, step: &Step) {
        if self.verbose || self.dry_run {
            let mode = if self.dry_run { "dry-run" } else { "exec" };
            output::command(mode, &format!("{} (in {})", step, step.cwd.display()));
        }
    }

    fn command(step: &Step) -> Command {
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args).current_dir(&step.cwd);
        cmd
    }
}

impl Runner for SystemRunner {
    fn status(&self, step: &Step) -> Result<Option<i32>, ExecuteError> {
        self.announce(step);
        if self.dry_run {
            return Ok(Some(0));
        }

        let status = Self::command(step)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecuteError::Spawn {
                cmd: step.to_string(),
                source,
            })?;

        Ok(status.code())
    }

    fn output(&self, step: &Step) -> Result<String, ExecuteError> {
        self.announce(step);
        if self.dry_run {
            return Ok(String::new());
        }

        let output = Self::command(step)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecuteError::Spawn {
                cmd: step.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExecuteError::CommandFailedWithStderr {
                cmd: step.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

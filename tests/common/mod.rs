//! Shared fixtures for orchestrator tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use axe_build::{Context, ExecuteError, Runner, Step};
use tempfile::TempDir;

/// Runner that records steps instead of starting processes.
///
/// Steps whose command line contains a registered pattern report the
/// registered exit code; everything else succeeds.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    steps: Rc<RefCell<Vec<Step>>>,
    exit_codes: Vec<(String, i32)>,
    tools: Vec<String>,
    describe: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default().with_tools(&["python"])
    }

    /// Make `pattern`-matching steps exit with `code`.
    pub fn exit_with(mut self, pattern: &str, code: i32) -> Self {
        self.exit_codes.push((pattern.to_string(), code));
        self
    }

    /// Tools reported as installed by `locate`.
    pub fn with_tools(mut self, tools: &[&str]) -> Self {
        self.tools = tools.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Output of `git describe`.
    pub fn describe(mut self, output: &str) -> Self {
        self.describe = Some(output.to_string());
        self
    }

    /// Shared handle on the recorded steps, usable after the runner moves.
    pub fn log(&self) -> Rc<RefCell<Vec<Step>>> {
        Rc::clone(&self.steps)
    }

    fn code_for(&self, step: &Step) -> i32 {
        let line = step.to_string();
        self.exit_codes
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0)
    }
}

impl Runner for RecordingRunner {
    fn status(&self, step: &Step) -> Result<Option<i32>, ExecuteError> {
        self.steps.borrow_mut().push(step.clone());
        Ok(Some(self.code_for(step)))
    }

    fn output(&self, step: &Step) -> Result<String, ExecuteError> {
        self.steps.borrow_mut().push(step.clone());
        let code = self.code_for(step);
        if code != 0 {
            return Err(ExecuteError::CommandFailedWithStderr {
                cmd: step.to_string(),
                stderr: "fatal: unable to access repository".to_string(),
            });
        }
        if step.args.first().map(String::as_str) == Some("describe") {
            return Ok(self.describe.clone().unwrap_or_default());
        }
        Ok(String::new())
    }

    fn locate(&self, tool: &str, _preferred: &Path) -> Option<PathBuf> {
        self.tools
            .iter()
            .any(|t| t == tool)
            .then(|| PathBuf::from("/fake/bin").join(tool))
    }
}

/// Create a project checkout and environment prefix under a temp dir.
///
/// The checkout carries its own release helper, so nothing is cloned.
pub fn create_test_env() -> (TempDir, Context) {
    let dir = TempDir::new().unwrap();
    let ctx = Context::with_prefix(dir.path().join("env")).source_root(dir.path().join("src"));
    std::fs::create_dir_all(ctx.bin_dir()).unwrap();
    std::fs::create_dir_all(ctx.native_dir()).unwrap();
    std::fs::create_dir_all(ctx.source_root.join("relic")).unwrap();
    (dir, ctx)
}

/// Drop the checkout's release helper so it has to be fetched.
pub fn remove_helper(ctx: &Context) {
    std::fs::remove_dir_all(ctx.source_root.join("relic")).unwrap();
}

/// Leave a Makefile behind as a previous configure would.
pub fn write_makefile(ctx: &Context) {
    std::fs::write(ctx.makefile(), "install:\n\ttrue\n").unwrap();
}

/// Render recorded steps as command lines.
pub fn command_lines(steps: &[Step]) -> Vec<String> {
    steps.iter().map(|s| s.to_string()).collect()
}

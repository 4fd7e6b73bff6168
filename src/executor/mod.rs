//! Build orchestrator - maps command names to operations and runs them
//! against a [`Context`] through a [`Runner`].

mod build;
mod cleanup;
mod context;
mod docs;
mod error;
mod remake;
mod runner;
mod test_runner;
mod util;
pub mod version;

pub use build::{build_native, configure_step, installer_step, make_step};
pub use cleanup::{clean_build_tree, remove_installed_binaries};
pub use context::Context;
pub use error::ExecuteError;
pub use remake::{resolve as resolve_remake, RemakeDecision};
pub use runner::{Runner, Step, SystemRunner};

/// Per-invocation options collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Trust an existing Makefile instead of reconfiguring
    pub no_remake: bool,
    /// `clean --all`: also remove built libraries, scripts and bdist output
    pub all: bool,
    /// Arguments forwarded to the test runner
    pub extra_args: Vec<String>,
}

/// How a successful operation wants the process to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Exit code reported by a delegated tool
    Exit(i32),
}

impl Outcome {
    pub fn code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Exit(code) => code,
        }
    }
}

/// A named command.
pub trait Operation: Sync {
    fn run(&self, ctx: &Context, runner: &dyn Runner, opts: &Options)
    -> Result<Outcome, ExecuteError>;
}

/// Command names and the operations they dispatch to. `build_ext` and
/// `install` share one handler.
pub const COMMANDS: &[(&str, &dyn Operation)] = &[
    ("build_ext", &build::Install),
    ("install", &build::Install),
    ("clean", &cleanup::Clean),
    ("test", &test_runner::TestRun),
    ("build_sphinx", &docs::BuildDocs),
    ("version", &version::ResolveVersion),
];

/// Look up the operation for a command name.
pub fn lookup(name: &str) -> Result<&'static dyn Operation, ExecuteError> {
    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, op)| *op)
        .ok_or_else(|| ExecuteError::UnknownCommand(name.to_string()))
}

/// Runs commands against one build configuration.
pub struct Executor {
    ctx: Context,
    runner: Box<dyn Runner>,
}

impl Executor {
    /// Create an executor that starts real processes.
    pub fn new(ctx: Context) -> Self {
        let runner = Box::new(SystemRunner::from_context(&ctx));
        Self { ctx, runner }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Dispatch a command by name.
    pub fn run(&self, command: &str, opts: &Options) -> Result<Outcome, ExecuteError> {
        lookup(command)?.run(&self.ctx, self.runner.as_ref(), opts)
    }
}
